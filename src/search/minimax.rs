//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Every node simulates on a cloned board; there is no make/unmake. The
//! simulation advances levels silently so the growth term in the evaluation
//! sees the post-capture level, but it never rolls skills, keeping the
//! search fully deterministic.

use crate::board::Board;
use crate::move_gen;
use crate::search::evaluate::evaluate;
use crate::search::quiescence::quiescence;
use crate::search::{ordering, simulate};
use crate::types::{MoveCandidate, PieceColor};

fn royal_missing(board: &Board) -> bool {
    board.find_royal(PieceColor::White).is_none() || board.find_royal(PieceColor::Black).is_none()
}

fn minimax(
    board: &Board,
    depth: u32,
    mut alpha: f32,
    mut beta: f32,
    maximizing: bool,
    perspective: PieceColor,
) -> f32 {
    if depth == 0 {
        return quiescence(board, alpha, beta, maximizing, perspective);
    }
    if royal_missing(board) {
        return evaluate(board, perspective);
    }

    let side = if maximizing {
        perspective
    } else {
        perspective.opposite()
    };
    let mut moves = move_gen::all_legal_moves(board, side, None);
    if moves.is_empty() {
        return evaluate(board, perspective);
    }
    ordering::order_moves(board, &mut moves);

    if maximizing {
        let mut best = f32::NEG_INFINITY;
        for mv in &moves {
            let mut clone = board.clone();
            simulate(&mut clone, mv);
            let score = minimax(&clone, depth - 1, alpha, beta, false, perspective);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = f32::INFINITY;
        for mv in &moves {
            let mut clone = board.clone();
            simulate(&mut clone, mv);
            let score = minimax(&clone, depth - 1, alpha, beta, true, perspective);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Picks the root move with the best minimax score. `moves` is the already
/// restricted root move list.
pub fn best_move(
    board: &Board,
    color: PieceColor,
    mut moves: Vec<MoveCandidate>,
    depth: u32,
) -> Option<MoveCandidate> {
    if moves.is_empty() {
        return None;
    }
    ordering::order_moves(board, &mut moves);

    let mut best: Option<MoveCandidate> = None;
    let mut best_score = f32::NEG_INFINITY;
    let mut alpha = f32::NEG_INFINITY;
    let beta = f32::INFINITY;

    for mv in moves {
        let mut clone = board.clone();
        simulate(&mut clone, &mv);
        let score = minimax(&clone, depth.saturating_sub(1), alpha, beta, false, color);
        if score > best_score || best.is_none() {
            best_score = score;
            best = Some(mv);
        }
        alpha = alpha.max(score);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use crate::types::{PieceType, Square};

    #[test]
    fn test_takes_free_queen() {
        let mut board = Board::empty();
        board.set(Square::new(7, 4), Piece::new(PieceType::King, PieceColor::White));
        board.set(Square::new(0, 4), Piece::new(PieceType::King, PieceColor::Black));
        board.set(Square::new(4, 0), Piece::new(PieceType::Rook, PieceColor::Black));
        board.set(Square::new(4, 6), Piece::new(PieceType::Queen, PieceColor::White));
        let moves = move_gen::all_legal_moves(&board, PieceColor::Black, None);
        let best = best_move(&board, PieceColor::Black, moves, 2).unwrap();
        assert_eq!(best.from, Square::new(4, 0));
        assert_eq!(best.to, Square::new(4, 6));
    }

    #[test]
    fn test_avoids_losing_the_exchange() {
        // Black rook can take a pawn defended by a pawn, or a free knight.
        let mut board = Board::empty();
        board.set(Square::new(7, 7), Piece::new(PieceType::King, PieceColor::White));
        board.set(Square::new(0, 0), Piece::new(PieceType::King, PieceColor::Black));
        board.set(Square::new(3, 3), Piece::new(PieceType::Rook, PieceColor::Black));
        board.set(Square::new(3, 6), Piece::new(PieceType::Pawn, PieceColor::White));
        board.set(Square::new(4, 7), Piece::new(PieceType::Pawn, PieceColor::White));
        board.set(Square::new(6, 3), Piece::new(PieceType::Knight, PieceColor::White));
        let moves = move_gen::all_legal_moves(&board, PieceColor::Black, None);
        let best = best_move(&board, PieceColor::Black, moves, 3).unwrap();
        assert_eq!(best.to, Square::new(6, 3));
    }
}
