//! Position evaluation.
//!
//! Scores are centipawn-flavored floats from the perspective of one side:
//! positive favors `perspective`. Material scales with level, every learned
//! skill adds its tier's worth, and a growth term credits pieces that are
//! close to their next level with the expected value of the skill they
//! would draw.

use crate::board::Board;
use crate::constants::{
    BISHOP_VALUE, CENTER_CORE_BONUS, CENTER_RING_BONUS, KINGS_CHARGE_SYNERGY_BONUS, KING_VALUE,
    KNIGHT_VALUE, LEVEL_VALUE_SCALE, MAX_LEVEL, PAWN_ADVANCE_BONUS, PAWN_VALUE, QUEEN_VALUE,
    ROOK_VALUE, SKILL_TIER_VALUE, SURVIVAL_SYNERGY_BONUS, TIER_PROBABILITIES, TIER_VALUES,
};
use crate::piece::Piece;
use crate::progression::threshold_for;
use crate::skills::SkillId;
use crate::types::{PieceColor, PieceType, Square};

/// Material value of one piece: the base kind value scaled by level, plus a
/// flat bonus per learned skill tier.
pub fn piece_value(piece: &Piece) -> f32 {
    let base = match piece.kind {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    };
    let leveled = base * (1.0 + (piece.level - 1) as f32 * LEVEL_VALUE_SCALE);
    let skill_bonus: f32 = piece
        .skills
        .iter()
        .map(|s| s.tier() as f32 * SKILL_TIER_VALUE)
        .sum();
    leveled + skill_bonus
}

/// Centralization and pawn-advancement bonus.
pub fn position_value(piece: &Piece, sq: Square) -> f32 {
    let mut bonus = 0.0;
    let (r, c) = (sq.row, sq.col);
    if (r == 3 || r == 4) && (c == 3 || c == 4) {
        bonus += CENTER_CORE_BONUS;
    } else if (2..=5).contains(&r) && (2..=5).contains(&c) {
        bonus += CENTER_RING_BONUS;
    }
    if piece.kind == PieceType::Pawn {
        let advance = match piece.color {
            PieceColor::White => 7 - r,
            PieceColor::Black => r,
        };
        bonus += advance as f32 * PAWN_ADVANCE_BONUS;
    }
    bonus
}

/// Bonus for skills whose value depends on where the piece stands.
pub fn synergy_value(piece: &Piece, sq: Square) -> f32 {
    let mut bonus = 0.0;
    if piece.has_skill(SkillId::SurvivalInstinct) && piece.in_enemy_territory(sq.row) {
        bonus += SURVIVAL_SYNERGY_BONUS;
    }
    if piece.has_skill(SkillId::KingsCharge) && (2..=5).contains(&sq.row) {
        bonus += KINGS_CHARGE_SYNERGY_BONUS;
    }
    bonus
}

/// Expected value of the skill the piece would draw at its next level,
/// prorated by its progress toward that level.
pub fn growth_potential(piece: &Piece) -> f32 {
    if piece.level >= MAX_LEVEL {
        return 0.0;
    }
    let current = threshold_for(piece.level) as f32;
    let next = threshold_for(piece.level + 1) as f32;
    let progress = (piece.xp as f32 - current) / (next - current);

    let weights = TIER_PROBABILITIES[(piece.level - 1) as usize];
    let expected: f32 = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| w as f32 / 100.0 * TIER_VALUES[i + 1])
        .sum();
    expected * progress
}

/// Full board score from `perspective`'s point of view.
pub fn evaluate(board: &Board, perspective: PieceColor) -> f32 {
    let mut score = 0.0;
    for (sq, piece) in board.iter() {
        let total = piece_value(piece)
            + position_value(piece, sq)
            + synergy_value(piece, sq)
            + growth_potential(piece);
        if piece.color == perspective {
            score += total;
        } else {
            score -= total;
        }
    }
    score
}

/// Material-only sum for one side, used for the sudden-death tiebreak.
pub fn material_score(board: &Board, color: PieceColor) -> f32 {
    board
        .iter()
        .filter(|(_, p)| p.color == color)
        .map(|(_, p)| piece_value(p))
        .sum()
}
