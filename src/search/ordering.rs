//! Move ordering for alpha-beta efficiency.
//!
//! Captures are sorted by a most-valuable-victim heuristic, crush moves get
//! a flat boost, and captures by a piece within one award of its next level
//! are tried early to surface growth lines sooner.

use crate::board::Board;
use crate::constants::{
    CAPTURE_ORDER_FACTOR, LEVELUP_ORDER_BONUS, LEVELUP_ORDER_MARGIN, MAX_LEVEL,
    TYRANT_ORDER_BONUS,
};
use crate::progression::threshold_for;
use crate::search::evaluate::piece_value;
use crate::types::{MoveCandidate, MoveKind};
use std::cmp::Ordering;

fn score(board: &Board, mv: &MoveCandidate) -> f32 {
    let mut score = 0.0;
    let target = board.get(mv.to);
    let attacker = board.get(mv.from);

    if let (Some(target), Some(attacker)) = (target, attacker) {
        score += CAPTURE_ORDER_FACTOR * piece_value(target) - piece_value(attacker);
    }
    if matches!(mv.kind, MoveKind::TyrantMarch { .. }) {
        score += TYRANT_ORDER_BONUS;
    }
    if let (Some(_), Some(attacker)) = (target, attacker) {
        let near_levelup = attacker.level < MAX_LEVEL
            && attacker.xp + LEVELUP_ORDER_MARGIN >= threshold_for(attacker.level + 1);
        if near_levelup {
            score += LEVELUP_ORDER_BONUS;
        }
    }
    score
}

/// Sorts moves best-first in place.
pub fn order_moves(board: &Board, moves: &mut [MoveCandidate]) {
    moves.sort_by(|a, b| {
        score(board, b)
            .partial_cmp(&score(board, a))
            .unwrap_or(Ordering::Equal)
    });
}
