//! Skill pool and the level-up draw.
//!
//! The registry is built once at session start and never mutated afterwards;
//! the session holds it behind a shared reference so simulated boards in
//! search can reuse it without copying. The default pool contains every
//! [`SkillId`], but a trimmed pool is supported for tests and custom rule
//! sets.

use crate::constants::{SKILL_DRAW_SLOTS, TIER_PROBABILITIES};
use crate::piece::Piece;
use crate::skills::SkillId;
use rand::Rng;

/// Immutable pool of skills available for drawing.
#[derive(Debug, Clone)]
pub struct SkillRegistry {
    pool: Vec<SkillId>,
}

impl SkillRegistry {
    /// Registry over the full standard pool.
    pub fn standard() -> Self {
        Self {
            pool: SkillId::ALL.to_vec(),
        }
    }

    /// Registry over a custom pool. Duplicates are collapsed.
    pub fn with_pool(pool: impl IntoIterator<Item = SkillId>) -> Self {
        let mut pool: Vec<SkillId> = pool.into_iter().collect();
        pool.sort_by_key(|s| (s.tier(), *s as u8));
        pool.dedup();
        Self { pool }
    }

    pub fn pool(&self) -> &[SkillId] {
        &self.pool
    }

    /// Tier weights for a piece that just reached `new_level`.
    ///
    /// Rows cover levels 2 through 5; each row sums to 100 and gives the
    /// percent chance of rolling tier 1 through 4 respectively.
    fn tier_weights(new_level: u8) -> [u8; 4] {
        let idx = (new_level.clamp(2, 5) - 2) as usize;
        TIER_PROBABILITIES[idx]
    }

    /// Rolls a rarity tier for the given level: a single d100 against the
    /// cumulative tier weights.
    fn roll_tier<R: Rng>(rng: &mut R, new_level: u8) -> u8 {
        let weights = Self::tier_weights(new_level);
        let roll = rng.random_range(0..100u32);
        let mut acc = 0u32;
        for (i, &w) in weights.iter().enumerate() {
            acc += w as u32;
            if roll < acc {
                return (i + 1) as u8;
            }
        }
        4
    }

    /// Skills in `tier` that `piece` could still learn, excluding anything
    /// already drawn this level-up.
    fn eligible(&self, piece: &Piece, tier: u8, drawn: &[SkillId]) -> Vec<SkillId> {
        self.pool
            .iter()
            .copied()
            .filter(|s| {
                s.tier() == tier
                    && s.allows(piece.kind)
                    && !piece.has_skill(*s)
                    && !drawn.contains(s)
            })
            .collect()
    }

    /// Draws one candidate at or above the rolled tier. When a tier has no
    /// eligible skill left the draw escalates to the next tier up; past
    /// tier 4 there is nothing to offer.
    fn draw_one<R: Rng>(
        &self,
        rng: &mut R,
        piece: &Piece,
        new_level: u8,
        drawn: &[SkillId],
    ) -> Option<SkillId> {
        let mut tier = Self::roll_tier(rng, new_level);
        while tier <= 4 {
            let candidates = self.eligible(piece, tier, drawn);
            if !candidates.is_empty() {
                let pick = rng.random_range(0..candidates.len());
                return Some(candidates[pick]);
            }
            tier += 1;
        }
        None
    }

    /// Draws up to [`SKILL_DRAW_SLOTS`] distinct skill choices for a piece
    /// that just reached `new_level`. Fewer than the full slate (possibly
    /// none) is returned when the pool runs dry.
    pub fn draw_choices<R: Rng>(&self, rng: &mut R, piece: &Piece, new_level: u8) -> Vec<SkillId> {
        let mut drawn = Vec::with_capacity(SKILL_DRAW_SLOTS);
        for _ in 0..SKILL_DRAW_SLOTS {
            match self.draw_one(rng, piece, new_level, &drawn) {
                Some(skill) => drawn.push(skill),
                None => break,
            }
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceColor, PieceType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pawn() -> Piece {
        Piece::new(PieceType::Pawn, PieceColor::White)
    }

    #[test]
    fn test_draw_respects_slot_count_and_uniqueness() {
        let registry = SkillRegistry::standard();
        let mut rng = StdRng::seed_from_u64(7);
        for level in 2..=5 {
            for _ in 0..50 {
                let choices = registry.draw_choices(&mut rng, &pawn(), level);
                assert!(choices.len() <= SKILL_DRAW_SLOTS);
                let mut dedup = choices.clone();
                dedup.sort_by_key(|s| *s as u8);
                dedup.dedup();
                assert_eq!(dedup.len(), choices.len(), "duplicate in {choices:?}");
            }
        }
    }

    #[test]
    fn test_draw_filters_type_and_owned() {
        let registry = SkillRegistry::standard();
        let mut rng = StdRng::seed_from_u64(11);
        let mut queen = Piece::new(PieceType::Queen, PieceColor::Black);
        queen.learn(SkillId::FastLearner);
        for _ in 0..200 {
            for choice in registry.draw_choices(&mut rng, &queen, 2) {
                assert!(choice.allows(PieceType::Queen), "{choice:?}");
                assert_ne!(choice, SkillId::FastLearner);
            }
        }
    }

    #[test]
    fn test_exhausted_tier_escalates_upward() {
        // Pool holds only one tier-4 skill; every draw must land on it and
        // the second slot comes back empty.
        let registry = SkillRegistry::with_pool([SkillId::Sacrifice]);
        let mut rng = StdRng::seed_from_u64(3);
        let choices = registry.draw_choices(&mut rng, &pawn(), 2);
        assert_eq!(choices, vec![SkillId::Sacrifice]);
    }

    #[test]
    fn test_fully_exhausted_pool_yields_no_choices() {
        let registry = SkillRegistry::with_pool([SkillId::Amazon]);
        let mut rng = StdRng::seed_from_u64(3);
        // A pawn can never learn Amazon.
        assert!(registry.draw_choices(&mut rng, &pawn(), 5).is_empty());
    }

    #[test]
    fn test_level_two_first_slot_never_rolls_tier_four() {
        // Level 2 weights give tier 4 a zero share, and the first slot has
        // lower tiers fully stocked, so it can never escalate that far.
        let registry = SkillRegistry::standard();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..300 {
            if let Some(first) = registry.draw_choices(&mut rng, &pawn(), 2).first() {
                assert!(first.tier() < 4, "{first:?}");
            }
        }
    }
}
