//! Knight leaps, the Wide Jump extension, and borrowed knight movement.
//!
//! Paladin's Sword and Amazon reuse this generator with `as_skill` set, so
//! a bishop or queen borrowing the leap reports its moves as skill moves.

use crate::board::Board;
use crate::constants::{KNIGHT_OFFSETS, WIDE_JUMP_OFFSETS};
use crate::piece::Piece;
use crate::skills::SkillId;
use crate::types::{MoveCandidate, MoveKind, PieceType, Square};

pub fn leap_moves(board: &Board, from: Square, piece: &Piece, as_skill: bool) -> Vec<MoveCandidate> {
    let mut moves = Vec::new();
    let wide_jump =
        piece.kind == PieceType::Knight && piece.has_skill(SkillId::WideJump);
    let cross_switch = piece.has_skill(SkillId::CrossSwitch);

    let offsets = KNIGHT_OFFSETS
        .iter()
        .chain(wide_jump.then_some(&WIDE_JUMP_OFFSETS[..]).into_iter().flatten());

    for &(dr, dc) in offsets {
        let Some(to) = from.offset(dr, dc) else { continue };
        match board.get(to) {
            None => {
                let kind = if as_skill { MoveKind::SkillMove } else { MoveKind::Normal };
                moves.push(MoveCandidate::new(from, to, kind));
            }
            Some(target) if target.color != piece.color => {
                let kind = if as_skill { MoveKind::SkillMove } else { MoveKind::Capture };
                moves.push(MoveCandidate::new(from, to, kind));
            }
            Some(_ally) if cross_switch => {
                // Leap swap: the ally lands on the leaper's origin.
                moves.push(MoveCandidate::new(
                    from,
                    to,
                    MoveKind::CrossSwitch { push_back: from },
                ));
            }
            Some(_) => {}
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceColor;

    #[test]
    fn test_knight_from_corner() {
        let mut board = Board::empty();
        let from = Square::new(7, 0);
        board.set(from, Piece::new(PieceType::Knight, PieceColor::White));
        let knight = board.get(from).unwrap().clone();
        let moves = leap_moves(&board, from, &knight, false);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.kind == MoveKind::Normal));
    }

    #[test]
    fn test_wide_jump_adds_orthogonal_leaps() {
        let mut board = Board::empty();
        let from = Square::new(4, 4);
        board.set(from, Piece::new(PieceType::Knight, PieceColor::White));
        board.get_mut(from).unwrap().learn(SkillId::WideJump);
        let knight = board.get(from).unwrap().clone();
        let moves = leap_moves(&board, from, &knight, false);
        assert_eq!(moves.len(), 12);
        assert!(moves.iter().any(|m| m.to == Square::new(2, 4)));
        assert!(moves.iter().any(|m| m.to == Square::new(4, 6)));
    }

    #[test]
    fn test_wide_jump_only_applies_to_knights() {
        // A queen borrowing knight movement never gains the wide leap even
        // if the skill somehow landed on it.
        let mut board = Board::empty();
        let from = Square::new(4, 4);
        board.set(from, Piece::new(PieceType::Queen, PieceColor::White));
        let queen = board.get(from).unwrap().clone();
        let moves = leap_moves(&board, from, &queen, true);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.kind == MoveKind::SkillMove));
    }

    #[test]
    fn test_borrowed_leap_capture_is_skill_move() {
        let mut board = Board::empty();
        let from = Square::new(4, 4);
        board.set(from, Piece::new(PieceType::Bishop, PieceColor::White));
        board.set(
            Square::new(2, 3),
            Piece::new(PieceType::Pawn, PieceColor::Black),
        );
        let bishop = board.get(from).unwrap().clone();
        let moves = leap_moves(&board, from, &bishop, true);
        assert!(moves
            .iter()
            .any(|m| m.to == Square::new(2, 3) && m.kind == MoveKind::SkillMove));
    }
}
