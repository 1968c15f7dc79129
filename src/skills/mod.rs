//! Skill definitions.
//!
//! A skill is an immutable definition: id, display name/description (opaque
//! to the engine), category, rarity tier (1 common - 4 legendary), and an
//! allow-list of piece types that may learn it (empty = unrestricted).
//! Skills attach to pieces by id; a piece never holds the same id twice.
//!
//! Skill *effects* live where they fire: movement skills inside
//! [`crate::move_gen`], capture/XP modifiers inside [`crate::progression`],
//! and engine-level side effects (extra turns, decoy, succession, sacrifice)
//! inside [`crate::game::session`].

pub mod registry;

use crate::types::PieceType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad effect category of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    /// Alters or extends how the piece moves.
    Movement,
    /// Grants a new kind of action (swap, pierce, on-the-spot promotion...).
    Action,
    /// Always-on or triggered effect with no new move shape.
    Passive,
}

/// Every skill the variant defines, keyed by a stable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    // Tier 1 - common
    FastLearner,
    SurvivalInstinct,
    BountyHunter,
    SideStep,
    Sprinter,
    // Tier 2 - uncommon
    CrossSwitch,
    TacticalBreakthrough,
    ComboStance,
    Acrobatics,
    WideJump,
    // Tier 3 - rare
    Piercing,
    FieldPromotion,
    KingsCharge,
    Cqc,
    PaladinsSword,
    Amazon,
    // Tier 4 - legendary
    Sacrifice,
    TyrantsMarch,
    Decoy,
    Succession,
}

impl SkillId {
    /// All skills, ordered by tier.
    pub const ALL: [SkillId; 20] = [
        SkillId::FastLearner,
        SkillId::SurvivalInstinct,
        SkillId::BountyHunter,
        SkillId::SideStep,
        SkillId::Sprinter,
        SkillId::CrossSwitch,
        SkillId::TacticalBreakthrough,
        SkillId::ComboStance,
        SkillId::Acrobatics,
        SkillId::WideJump,
        SkillId::Piercing,
        SkillId::FieldPromotion,
        SkillId::KingsCharge,
        SkillId::Cqc,
        SkillId::PaladinsSword,
        SkillId::Amazon,
        SkillId::Sacrifice,
        SkillId::TyrantsMarch,
        SkillId::Decoy,
        SkillId::Succession,
    ];

    /// Rarity tier, 1 (common) through 4 (legendary).
    pub fn tier(self) -> u8 {
        match self {
            SkillId::FastLearner
            | SkillId::SurvivalInstinct
            | SkillId::BountyHunter
            | SkillId::SideStep
            | SkillId::Sprinter => 1,
            SkillId::CrossSwitch
            | SkillId::TacticalBreakthrough
            | SkillId::ComboStance
            | SkillId::Acrobatics
            | SkillId::WideJump => 2,
            SkillId::Piercing
            | SkillId::FieldPromotion
            | SkillId::KingsCharge
            | SkillId::Cqc
            | SkillId::PaladinsSword
            | SkillId::Amazon => 3,
            SkillId::Sacrifice
            | SkillId::TyrantsMarch
            | SkillId::Decoy
            | SkillId::Succession => 4,
        }
    }

    pub fn category(self) -> SkillCategory {
        match self {
            SkillId::SideStep
            | SkillId::Sprinter
            | SkillId::Acrobatics
            | SkillId::WideJump
            | SkillId::KingsCharge
            | SkillId::Cqc
            | SkillId::PaladinsSword
            | SkillId::Amazon => SkillCategory::Movement,
            SkillId::CrossSwitch
            | SkillId::Piercing
            | SkillId::FieldPromotion
            | SkillId::TyrantsMarch => SkillCategory::Action,
            SkillId::FastLearner
            | SkillId::SurvivalInstinct
            | SkillId::BountyHunter
            | SkillId::TacticalBreakthrough
            | SkillId::ComboStance
            | SkillId::Sacrifice
            | SkillId::Decoy
            | SkillId::Succession => SkillCategory::Passive,
        }
    }

    /// Piece types that may learn this skill. Empty = unrestricted.
    pub fn allowed_types(self) -> &'static [PieceType] {
        match self {
            SkillId::SideStep | SkillId::Sprinter | SkillId::FieldPromotion => &[PieceType::Pawn],
            SkillId::WideJump => &[PieceType::Knight],
            SkillId::ComboStance => &[
                PieceType::Pawn,
                PieceType::Rook,
                PieceType::Knight,
                PieceType::Bishop,
                PieceType::King,
            ],
            SkillId::KingsCharge | SkillId::Decoy => &[PieceType::King],
            SkillId::Cqc => &[PieceType::Bishop, PieceType::Rook],
            SkillId::PaladinsSword => &[PieceType::Bishop],
            SkillId::Amazon | SkillId::Succession => &[PieceType::Queen],
            _ => &[],
        }
    }

    /// Whether a piece of the given type may learn this skill.
    pub fn allows(self, kind: PieceType) -> bool {
        let allowed = self.allowed_types();
        allowed.is_empty() || allowed.contains(&kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            SkillId::FastLearner => "Fast Learner",
            SkillId::SurvivalInstinct => "Survival Instinct",
            SkillId::BountyHunter => "Bounty Hunter",
            SkillId::SideStep => "Side Step",
            SkillId::Sprinter => "Sprinter",
            SkillId::CrossSwitch => "Cross Switch",
            SkillId::TacticalBreakthrough => "Tactical Breakthrough",
            SkillId::ComboStance => "Combo Stance",
            SkillId::Acrobatics => "Acrobatics",
            SkillId::WideJump => "Wide Jump",
            SkillId::Piercing => "Piercing",
            SkillId::FieldPromotion => "Field Promotion",
            SkillId::KingsCharge => "King's Charge",
            SkillId::Cqc => "CQC",
            SkillId::PaladinsSword => "Paladin's Sword",
            SkillId::Amazon => "Amazon",
            SkillId::Sacrifice => "Sacrifice",
            SkillId::TyrantsMarch => "Tyrant's March",
            SkillId::Decoy => "Decoy",
            SkillId::Succession => "Succession",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SkillId::FastLearner => "Gains XP at the start of each turn (+3% +5)",
            SkillId::SurvivalInstinct => "Gains XP each turn while in enemy territory (+6% +10)",
            SkillId::BountyHunter => "Capture XP increased by 50%",
            SkillId::SideStep => "May step diagonally forward without capturing",
            SkillId::Sprinter => "May always advance two squares",
            SkillId::CrossSwitch => "Swap positions with an adjacent or in-line ally",
            SkillId::TacticalBreakthrough => {
                "On acquisition, this piece immediately gains a bonus action (once)"
            }
            SkillId::ComboStance => "The turn after a capture, moves with a queen's range",
            SkillId::Acrobatics => "Sliding moves pass over occupied squares",
            SkillId::WideJump => "Adds two-square orthogonal leaps to the knight's moves",
            SkillId::Piercing => "May capture a second enemy directly behind the first",
            SkillId::FieldPromotion => "May promote on the spot without reaching the last rank",
            SkillId::KingsCharge => "Extends the king's reach to the surrounding two-square ring",
            SkillId::Cqc => "Adds king-step movement",
            SkillId::PaladinsSword => "Adds knight movement",
            SkillId::Amazon => "Adds knight movement",
            SkillId::Sacrifice => "When captured, removes the capturing piece as well",
            SkillId::TyrantsMarch => "Crushes every enemy along the ray, landing beyond them",
            SkillId::Decoy => "When captured, swaps with an ally and survives (once)",
            SkillId::Succession => "When the king falls, this queen inherits the crown (once)",
        }
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_skills_have_valid_tier() {
        for skill in SkillId::ALL {
            assert!((1..=4).contains(&skill.tier()), "{skill:?}");
        }
    }

    #[test]
    fn test_tier_counts() {
        let count = |t: u8| SkillId::ALL.iter().filter(|s| s.tier() == t).count();
        assert_eq!(count(1), 5);
        assert_eq!(count(2), 5);
        assert_eq!(count(3), 6);
        assert_eq!(count(4), 4);
    }

    #[test]
    fn test_allow_lists() {
        assert!(SkillId::Sprinter.allows(PieceType::Pawn));
        assert!(!SkillId::Sprinter.allows(PieceType::Queen));
        assert!(SkillId::Amazon.allows(PieceType::Queen));
        assert!(!SkillId::Amazon.allows(PieceType::Bishop));
        // Unrestricted skill.
        assert!(SkillId::Acrobatics.allows(PieceType::King));
        // Combo Stance deliberately excludes queens.
        assert!(!SkillId::ComboStance.allows(PieceType::Queen));
    }
}
