//! Piece state.
//!
//! Beyond the classical type/color/has-moved triple, a piece carries its
//! progression state (level, experience, learned skills), a royal flag that
//! may migrate off the king (Decoy, Succession), and the Combo Stance
//! charge tracker.

use crate::skills::SkillId;
use crate::types::{PieceColor, PieceType};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

/// Combo Stance charge state.
///
/// A capture arms the stance (`Pending`); at the start of the owner's next
/// turn it becomes `Active` for exactly one turn, then decays back to `None`
/// unless re-armed by another capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComboState {
    #[default]
    None,
    Pending,
    Active,
}

/// A single piece on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Piece {
    /// Stable identity, preserved across moves and promotion.
    pub id: Uuid,
    pub kind: PieceType,
    pub color: PieceColor,
    pub has_moved: bool,
    /// Whose capture ends the game. Starts on the king but can migrate.
    pub is_royal: bool,
    /// Current level, 1 through [`crate::constants::MAX_LEVEL`].
    pub level: u8,
    /// Lifetime experience. Never reset on level-up.
    pub xp: u32,
    pub skills: SmallVec<[SkillId; 4]>,
    pub combo: ComboState,
}

impl Piece {
    pub fn new(kind: PieceType, color: PieceColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            color,
            has_moved: false,
            is_royal: kind == PieceType::King,
            level: 1,
            xp: 0,
            skills: SmallVec::new(),
            combo: ComboState::None,
        }
    }

    pub fn has_skill(&self, skill: SkillId) -> bool {
        self.skills.contains(&skill)
    }

    /// Attaches a skill. Duplicate ids are ignored.
    pub fn learn(&mut self, skill: SkillId) {
        if !self.has_skill(skill) {
            self.skills.push(skill);
        }
    }

    /// Removes a skill if present. Used by one-shot skills that consume
    /// themselves (Decoy, Succession, Tactical Breakthrough).
    pub fn forget(&mut self, skill: SkillId) {
        self.skills.retain(|s| *s != skill);
    }

    pub fn add_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    /// Whether this piece sits in enemy territory at the given row.
    /// White's enemy half is rows 0..=3, Black's is rows 4..=7.
    pub fn in_enemy_territory(&self, row: u8) -> bool {
        match self.color {
            PieceColor::White => row <= 3,
            PieceColor::Black => row >= 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_piece_defaults() {
        let p = Piece::new(PieceType::Knight, PieceColor::White);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 0);
        assert!(!p.has_moved);
        assert!(!p.is_royal);
        assert!(p.skills.is_empty());
        assert_eq!(p.combo, ComboState::None);
    }

    #[test]
    fn test_king_is_royal() {
        assert!(Piece::new(PieceType::King, PieceColor::Black).is_royal);
        assert!(!Piece::new(PieceType::Queen, PieceColor::Black).is_royal);
    }

    #[test]
    fn test_learn_is_idempotent() {
        let mut p = Piece::new(PieceType::Pawn, PieceColor::White);
        p.learn(SkillId::Sprinter);
        p.learn(SkillId::Sprinter);
        assert_eq!(p.skills.len(), 1);
        p.forget(SkillId::Sprinter);
        assert!(!p.has_skill(SkillId::Sprinter));
    }

    #[test]
    fn test_enemy_territory_is_color_relative() {
        let white = Piece::new(PieceType::Pawn, PieceColor::White);
        let black = Piece::new(PieceType::Pawn, PieceColor::Black);
        assert!(white.in_enemy_territory(3));
        assert!(!white.in_enemy_territory(4));
        assert!(black.in_enemy_territory(4));
        assert!(!black.in_enemy_territory(3));
    }
}
