//! Pawn movement: pushes, diagonal captures, en passant, and the pawn-only
//! skills (Sprinter, Side Step, Field Promotion, pawn-shaped Cross Switch).

use crate::board::Board;
use crate::piece::Piece;
use crate::skills::SkillId;
use crate::types::{LastMove, MoveCandidate, MoveKind, PieceColor, PieceType, Square};

fn start_row(color: PieceColor) -> u8 {
    match color {
        PieceColor::White => 6,
        PieceColor::Black => 1,
    }
}

pub fn moves(
    board: &Board,
    from: Square,
    piece: &Piece,
    last_move: Option<&LastMove>,
) -> Vec<MoveCandidate> {
    let mut moves = Vec::new();
    let dir = piece.color.forward();
    let on_start = from.row == start_row(piece.color);
    let cross_switch = piece.has_skill(SkillId::CrossSwitch);

    // Single push, or swap with the ally directly ahead.
    if let Some(one) = from.offset(dir, 0) {
        match board.get(one) {
            None => moves.push(MoveCandidate::new(from, one, MoveKind::Normal)),
            Some(ally) if ally.color == piece.color && cross_switch => {
                moves.push(MoveCandidate::new(
                    from,
                    one,
                    MoveKind::CrossSwitch { push_back: from },
                ));
            }
            Some(_) => {}
        }

        // Double push from the start row, or from anywhere with Sprinter.
        let sprinter = piece.has_skill(SkillId::Sprinter);
        if on_start || sprinter {
            if let Some(two) = from.offset(dir * 2, 0) {
                let intermediate_clear = board.is_empty_at(one);
                match board.get(two) {
                    None if intermediate_clear => {
                        let kind = if sprinter && !on_start {
                            MoveKind::SkillMove
                        } else {
                            MoveKind::Normal
                        };
                        moves.push(MoveCandidate::new(from, two, kind));
                    }
                    Some(ally)
                        if ally.color == piece.color
                            && intermediate_clear
                            && cross_switch =>
                    {
                        // The displaced ally lands on the bypassed square.
                        moves.push(MoveCandidate::new(
                            from,
                            two,
                            MoveKind::CrossSwitch { push_back: one },
                        ));
                    }
                    _ => {}
                }
            }
        }
    }

    // Diagonal attacks, Side Step, and diagonal swaps.
    for dc in [-1, 1] {
        let Some(to) = from.offset(dir, dc) else { continue };
        match board.get(to) {
            Some(target) if target.color != piece.color => {
                moves.push(MoveCandidate::new(from, to, MoveKind::Capture));
            }
            None if piece.has_skill(SkillId::SideStep) => {
                moves.push(MoveCandidate::new(from, to, MoveKind::SkillMove));
            }
            Some(_ally) if cross_switch => {
                moves.push(MoveCandidate::new(
                    from,
                    to,
                    MoveKind::CrossSwitch { push_back: from },
                ));
            }
            _ => {}
        }
    }

    // En passant against a pawn that just double-stepped alongside.
    if let Some(last) = last_move {
        let was_double_pawn_push =
            last.mover == PieceType::Pawn && last.from.row.abs_diff(last.to.row) == 2;
        if was_double_pawn_push
            && last.to.row == from.row
            && last.to.col.abs_diff(from.col) == 1
        {
            if let Some(to) = from.offset(dir, (last.to.col as i8) - (from.col as i8)) {
                moves.push(MoveCandidate::new(from, to, MoveKind::EnPassant));
            }
        }
    }

    // Field Promotion: spend the move in place and promote.
    if piece.has_skill(SkillId::FieldPromotion) {
        moves.push(MoveCandidate::new(from, from, MoveKind::FieldPromotion));
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_pawn_at(board: &mut Board, sq: Square) -> Piece {
        board.set(sq, Piece::new(PieceType::Pawn, PieceColor::White));
        board.get(sq).unwrap().clone()
    }

    #[test]
    fn test_start_row_double_push() {
        let mut board = Board::empty();
        let from = Square::new(6, 3);
        let pawn = white_pawn_at(&mut board, from);
        let moves = moves(&board, from, &pawn, None);
        assert!(moves
            .iter()
            .any(|m| m.to == Square::new(4, 3) && m.kind == MoveKind::Normal));
    }

    #[test]
    fn test_sprinter_double_push_away_from_start() {
        let mut board = Board::empty();
        let from = Square::new(4, 3);
        white_pawn_at(&mut board, from);
        board.get_mut(from).unwrap().learn(SkillId::Sprinter);
        let pawn = board.get(from).unwrap().clone();
        let moves = moves(&board, from, &pawn, None);
        assert!(moves
            .iter()
            .any(|m| m.to == Square::new(2, 3) && m.kind == MoveKind::SkillMove));
    }

    #[test]
    fn test_double_push_blocked_by_intermediate() {
        let mut board = Board::empty();
        let from = Square::new(6, 3);
        let pawn = white_pawn_at(&mut board, from);
        board.set(
            Square::new(5, 3),
            Piece::new(PieceType::Knight, PieceColor::Black),
        );
        let moves = moves(&board, from, &pawn, None);
        assert!(!moves.iter().any(|m| m.to == Square::new(4, 3)));
    }

    #[test]
    fn test_side_step_moves_into_empty_diagonal() {
        let mut board = Board::empty();
        let from = Square::new(5, 3);
        white_pawn_at(&mut board, from);
        board.get_mut(from).unwrap().learn(SkillId::SideStep);
        let pawn = board.get(from).unwrap().clone();
        let moves = moves(&board, from, &pawn, None);
        assert!(moves
            .iter()
            .any(|m| m.to == Square::new(4, 2) && m.kind == MoveKind::SkillMove));
        assert!(moves
            .iter()
            .any(|m| m.to == Square::new(4, 4) && m.kind == MoveKind::SkillMove));
    }

    #[test]
    fn test_en_passant_requires_adjacent_double_push() {
        let mut board = Board::empty();
        let from = Square::new(3, 4);
        let pawn = white_pawn_at(&mut board, from);
        board.set(
            Square::new(3, 5),
            Piece::new(PieceType::Pawn, PieceColor::Black),
        );
        let last = LastMove {
            mover: PieceType::Pawn,
            from: Square::new(1, 5),
            to: Square::new(3, 5),
        };
        let with_last = moves(&board, from, &pawn, Some(&last));
        assert!(with_last
            .iter()
            .any(|m| m.to == Square::new(2, 5) && m.kind == MoveKind::EnPassant));
        // Without the triggering move the capture is gone.
        let without = moves(&board, from, &pawn, None);
        assert!(!without.iter().any(|m| m.kind == MoveKind::EnPassant));
    }

    #[test]
    fn test_field_promotion_is_in_place() {
        let mut board = Board::empty();
        let from = Square::new(5, 0);
        white_pawn_at(&mut board, from);
        board.get_mut(from).unwrap().learn(SkillId::FieldPromotion);
        let pawn = board.get(from).unwrap().clone();
        let moves = moves(&board, from, &pawn, None);
        assert!(moves
            .iter()
            .any(|m| m.from == from && m.to == from && m.kind == MoveKind::FieldPromotion));
    }

    #[test]
    fn test_cross_switch_two_forward_pushes_ally_between() {
        let mut board = Board::empty();
        let from = Square::new(6, 3);
        white_pawn_at(&mut board, from);
        board.get_mut(from).unwrap().learn(SkillId::CrossSwitch);
        board.set(
            Square::new(4, 3),
            Piece::new(PieceType::Rook, PieceColor::White),
        );
        let pawn = board.get(from).unwrap().clone();
        let moves = moves(&board, from, &pawn, None);
        assert!(moves.iter().any(|m| m.to == Square::new(4, 3)
            && m.kind == MoveKind::CrossSwitch {
                push_back: Square::new(5, 3)
            }));
    }
}
