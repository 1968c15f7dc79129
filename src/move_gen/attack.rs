//! Attack and check oracle.
//!
//! A square counts as attacked when any enemy piece has a pseudo move whose
//! destination is that square. Crush victims of a Tyrant's March are *not*
//! attacked by this definition (the march can only land on an empty square),
//! while a Piercing follow-up square is. Check targets the royal piece,
//! which is usually but not always the king.

use crate::board::Board;
use crate::move_gen;
use crate::types::{MoveCandidate, PieceColor, Square};

/// Whether any piece of `by` has a move landing on `target`.
pub fn is_square_attacked(board: &Board, target: Square, by: PieceColor) -> bool {
    board.iter().any(|(sq, piece)| {
        piece.color == by
            && move_gen::pseudo_moves(board, sq, None, false)
                .iter()
                .any(|mv| mv.to == target)
    })
}

/// Whether the royal piece of `color` currently stands attacked.
///
/// A side with no royal piece has already lost; it cannot be in check.
pub fn is_in_check(board: &Board, color: PieceColor) -> bool {
    match board.find_royal(color) {
        Some((sq, _)) => is_square_attacked(board, sq, color.opposite()),
        None => {
            tracing::warn!(%color, "check query with no royal piece on the board");
            false
        }
    }
}

/// Whether executing `mv` would leave `color`'s royal piece attacked.
/// Runs the full move effect on a throwaway clone.
pub fn would_cause_check(board: &Board, mv: &MoveCandidate, color: PieceColor) -> bool {
    let mut clone = board.clone();
    clone.apply(mv);
    is_in_check(&clone, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use crate::skills::SkillId;
    use crate::types::{MoveKind, PieceType};

    #[test]
    fn test_rook_attacks_along_open_file() {
        let mut board = Board::empty();
        board.set(Square::new(0, 0), Piece::new(PieceType::Rook, PieceColor::Black));
        assert!(is_square_attacked(&board, Square::new(7, 0), PieceColor::Black));
        assert!(!is_square_attacked(&board, Square::new(7, 1), PieceColor::Black));
    }

    #[test]
    fn test_check_detects_attacked_royal() {
        let mut board = Board::empty();
        board.set(Square::new(7, 4), Piece::new(PieceType::King, PieceColor::White));
        board.set(Square::new(0, 4), Piece::new(PieceType::Rook, PieceColor::Black));
        assert!(is_in_check(&board, PieceColor::White));
        board.set(Square::new(4, 4), Piece::new(PieceType::Pawn, PieceColor::White));
        assert!(!is_in_check(&board, PieceColor::White));
    }

    #[test]
    fn test_check_follows_migrated_royal_flag() {
        let mut board = Board::empty();
        let mut queen = Piece::new(PieceType::Queen, PieceColor::White);
        queen.is_royal = true;
        board.set(Square::new(5, 0), queen);
        board.set(Square::new(0, 0), Piece::new(PieceType::Rook, PieceColor::Black));
        assert!(is_in_check(&board, PieceColor::White));
    }

    #[test]
    fn test_skill_reach_extends_attack() {
        // An acrobatic rook attacks through a blocker.
        let mut board = Board::empty();
        let mut rook = Piece::new(PieceType::Rook, PieceColor::Black);
        rook.learn(SkillId::Acrobatics);
        board.set(Square::new(0, 0), rook);
        board.set(Square::new(3, 0), Piece::new(PieceType::Pawn, PieceColor::Black));
        assert!(is_square_attacked(&board, Square::new(7, 0), PieceColor::Black));
    }

    #[test]
    fn test_would_cause_check_sees_discovered_attack() {
        let mut board = Board::empty();
        board.set(Square::new(7, 4), Piece::new(PieceType::King, PieceColor::White));
        board.set(Square::new(4, 4), Piece::new(PieceType::Bishop, PieceColor::White));
        board.set(Square::new(0, 4), Piece::new(PieceType::Rook, PieceColor::Black));
        let mv = MoveCandidate::new(Square::new(4, 4), Square::new(3, 3), MoveKind::Normal);
        assert!(would_cause_check(&board, &mv, PieceColor::White));
        assert!(!is_in_check(&board, PieceColor::White));
    }
}
