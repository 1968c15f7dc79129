//! King movement: the one-square ring, castling shape, King's Charge, and
//! the close-quarters ring borrowed by CQC pieces.
//!
//! Castling here checks shape only (unmoved king and rook, clear path).
//! Whether the crossing square is attacked is filtered at the legal-move
//! layer, where the attack oracle is available without recursion.

use crate::board::Board;
use crate::constants::{KINGS_CHARGE_OFFSETS, KING_OFFSETS};
use crate::piece::Piece;
use crate::skills::SkillId;
use crate::types::{MoveCandidate, MoveKind, PieceType, Square};

/// Plain one-square ring with no swap handling. Rooks and bishops with CQC
/// borrow this.
pub fn ring_moves(board: &Board, from: Square, piece: &Piece) -> Vec<MoveCandidate> {
    let mut moves = Vec::new();
    for &(dr, dc) in &KING_OFFSETS {
        let Some(to) = from.offset(dr, dc) else { continue };
        match board.get(to) {
            None => moves.push(MoveCandidate::new(from, to, MoveKind::Normal)),
            Some(target) if target.color != piece.color => {
                moves.push(MoveCandidate::new(from, to, MoveKind::Capture));
            }
            Some(_) => {}
        }
    }
    moves
}

pub fn moves(
    board: &Board,
    from: Square,
    piece: &Piece,
    include_castling: bool,
) -> Vec<MoveCandidate> {
    let mut moves = Vec::new();
    let cross_switch = piece.has_skill(SkillId::CrossSwitch);

    for &(dr, dc) in &KING_OFFSETS {
        let Some(to) = from.offset(dr, dc) else { continue };
        match board.get(to) {
            None => moves.push(MoveCandidate::new(from, to, MoveKind::Normal)),
            Some(target) if target.color != piece.color => {
                moves.push(MoveCandidate::new(from, to, MoveKind::Capture));
            }
            Some(_ally) if cross_switch => {
                moves.push(MoveCandidate::new(
                    from,
                    to,
                    MoveKind::CrossSwitch { push_back: from },
                ));
            }
            Some(_) => {}
        }
    }

    if piece.has_skill(SkillId::KingsCharge) {
        for &(dr, dc) in &KINGS_CHARGE_OFFSETS {
            let Some(to) = from.offset(dr, dc) else { continue };
            match board.get(to) {
                None => moves.push(MoveCandidate::new(from, to, MoveKind::Normal)),
                Some(target) if target.color != piece.color => {
                    moves.push(MoveCandidate::new(from, to, MoveKind::Capture));
                }
                Some(_ally) if cross_switch => {
                    // A straight or diagonal two-square charge pushes the
                    // ally to the midpoint; a knight-shaped charge swaps.
                    let push_back = if dr % 2 == 0 && dc % 2 == 0 {
                        from.offset(dr / 2, dc / 2).unwrap_or(from)
                    } else {
                        from
                    };
                    moves.push(MoveCandidate::new(
                        from,
                        to,
                        MoveKind::CrossSwitch { push_back },
                    ));
                }
                Some(_) => {}
            }
        }
    }

    if include_castling && !piece.has_moved {
        let row = from.row;
        let unmoved_rook = |col: u8| {
            board
                .get(Square::new(row, col))
                .is_some_and(|p| p.kind == PieceType::Rook && !p.has_moved)
        };
        if unmoved_rook(7)
            && board.is_empty_at(Square::new(row, 5))
            && board.is_empty_at(Square::new(row, 6))
        {
            moves.push(MoveCandidate::new(
                from,
                Square::new(row, 6),
                MoveKind::CastleKingside,
            ));
        }
        if unmoved_rook(0)
            && board.is_empty_at(Square::new(row, 1))
            && board.is_empty_at(Square::new(row, 2))
            && board.is_empty_at(Square::new(row, 3))
        {
            moves.push(MoveCandidate::new(
                from,
                Square::new(row, 2),
                MoveKind::CastleQueenside,
            ));
        }
    }

    moves
}
