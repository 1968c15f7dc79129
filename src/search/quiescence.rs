//! Capture-only quiescence search.
//!
//! At the horizon the search keeps resolving forcing moves so it never cuts
//! off in the middle of an exchange. Forcing means the destination square
//! is occupied or the move kind itself removes an enemy (en passant and
//! crush moves capture without landing on the victim's square).

use crate::board::Board;
use crate::move_gen;
use crate::search::evaluate::evaluate;
use crate::search::{ordering, simulate};
use crate::types::{MoveCandidate, PieceColor};

fn is_forcing(board: &Board, mv: &MoveCandidate) -> bool {
    board.get(mv.to).is_some() || mv.kind.is_aggressive()
}

pub fn quiescence(
    board: &Board,
    mut alpha: f32,
    mut beta: f32,
    maximizing: bool,
    perspective: PieceColor,
) -> f32 {
    let stand_pat = evaluate(board, perspective);
    if maximizing {
        if stand_pat >= beta {
            return beta;
        }
        alpha = alpha.max(stand_pat);
    } else if stand_pat <= alpha {
        return alpha;
    }

    let side = if maximizing {
        perspective
    } else {
        perspective.opposite()
    };
    let mut forcing: Vec<MoveCandidate> = move_gen::all_legal_moves(board, side, None)
        .into_iter()
        .filter(|mv| is_forcing(board, mv))
        .collect();
    if forcing.is_empty() {
        return stand_pat;
    }
    ordering::order_moves(board, &mut forcing);

    if maximizing {
        let mut best = stand_pat;
        for mv in &forcing {
            let mut clone = board.clone();
            simulate(&mut clone, mv);
            let score = quiescence(&clone, alpha, beta, false, perspective);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = stand_pat;
        for mv in &forcing {
            let mut clone = board.clone();
            simulate(&mut clone, mv);
            let score = quiescence(&clone, alpha, beta, true, perspective);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
