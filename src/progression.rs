//! Experience accounting and level thresholds.
//!
//! All XP math lives here so that the live session and the search simulation
//! award identical amounts. Percentage-based awards truncate toward zero.
//! Leveling never resets XP: a piece's lifetime total is compared against
//! the absolute thresholds in [`XP_THRESHOLDS`].

use crate::constants::{
    BISHOP_CAPTURE_XP, BOUNTY_HUNTER_FACTOR, DEFAULT_CAPTURE_XP, FAST_LEARNER_FLAT,
    FAST_LEARNER_RATE, KNIGHT_CAPTURE_XP, MAX_LEVEL, PAWN_CAPTURE_XP, QUEEN_CAPTURE_XP,
    RANK_XP, ROOK_CAPTURE_XP, SURVIVAL_INSTINCT_FLAT, SURVIVAL_INSTINCT_RATE, XP_STEAL_RATE,
    XP_THRESHOLDS,
};
use crate::piece::Piece;
use crate::skills::SkillId;
use crate::types::{PieceColor, PieceType};

/// Base XP for capturing a piece of the given kind.
pub fn base_capture_xp(kind: PieceType) -> u32 {
    match kind {
        PieceType::Pawn => PAWN_CAPTURE_XP,
        PieceType::Knight => KNIGHT_CAPTURE_XP,
        PieceType::Bishop => BISHOP_CAPTURE_XP,
        PieceType::Rook => ROOK_CAPTURE_XP,
        PieceType::Queen => QUEEN_CAPTURE_XP,
        PieceType::King => DEFAULT_CAPTURE_XP,
    }
}

/// Total XP a captor earns for one victim: the kind's base value, scaled up
/// for Bounty Hunter, plus a share of the victim's own accumulated XP.
pub fn capture_award(captor: &Piece, victim: &Piece) -> u32 {
    let mut base = base_capture_xp(victim.kind);
    if captor.has_skill(SkillId::BountyHunter) {
        base = (base as f32 * BOUNTY_HUNTER_FACTOR) as u32;
    }
    let stolen = (victim.xp as f32 * XP_STEAL_RATE) as u32;
    base + stolen
}

/// Positional XP earned at the start of the owner's turn, based on how deep
/// the piece stands in the opponent's half. Rank is measured from the
/// owner's own baseline.
pub fn rank_xp(color: PieceColor, row: u8) -> u32 {
    let rank = color.rank_of_row(row);
    for &(min_rank, xp) in &RANK_XP {
        if rank >= min_rank {
            return xp;
        }
    }
    0
}

/// Start-of-turn passive award for Fast Learner.
pub fn fast_learner_xp(piece: &Piece) -> u32 {
    (piece.xp as f32 * FAST_LEARNER_RATE) as u32 + FAST_LEARNER_FLAT
}

/// Start-of-turn passive award for Survival Instinct, applied only when the
/// piece stands in enemy territory.
pub fn survival_instinct_xp(piece: &Piece) -> u32 {
    (piece.xp as f32 * SURVIVAL_INSTINCT_RATE) as u32 + SURVIVAL_INSTINCT_FLAT
}

/// XP required to reach `level`.
pub fn threshold_for(level: u8) -> u32 {
    XP_THRESHOLDS[(level.min(MAX_LEVEL) - 1) as usize]
}

/// Advances the piece by at most one level if its XP clears the next
/// threshold. Returns the new level when an advance happened.
///
/// One step per call: the session re-checks after every skill grant so a
/// large XP windfall produces a queue of separate level-up interrupts.
pub fn check_level_up(piece: &mut Piece) -> Option<u8> {
    if piece.level >= MAX_LEVEL {
        return None;
    }
    if piece.xp >= threshold_for(piece.level + 1) {
        piece.level += 1;
        Some(piece.level)
    } else {
        None
    }
}

/// Silently advances a piece as many levels as its XP supports, without
/// drawing any skills. The search simulation uses this so a simulated
/// capture still sees the level-scaled value bump.
pub fn advance_levels_silently(piece: &mut Piece) {
    while check_level_up(piece).is_some() {}
}

/// Progress toward the next level, for display purposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProgress {
    /// XP earned past the current level's threshold.
    pub into_level: u32,
    /// XP span between the current and next thresholds. Zero at max level.
    pub needed: u32,
    /// `into_level / needed`, clamped to 0..=1. Full at max level.
    pub percent: f32,
}

pub fn level_progress(piece: &Piece) -> LevelProgress {
    if piece.level >= MAX_LEVEL {
        return LevelProgress {
            into_level: 0,
            needed: 0,
            percent: 1.0,
        };
    }
    let current = threshold_for(piece.level);
    let next = threshold_for(piece.level + 1);
    let into_level = piece.xp.saturating_sub(current);
    let needed = next - current;
    LevelProgress {
        into_level,
        needed,
        percent: (into_level as f32 / needed as f32).min(1.0),
    }
}
