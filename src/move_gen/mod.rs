//! Candidate move generation.
//!
//! [`pseudo_moves`] produces every move a piece's kind and skill set allow,
//! with no king-safety filtering. [`legal_moves`] additionally rejects
//! castling through an attacked crossing square. Moving into check is *not*
//! filtered here: royal capture ends the game in this variant, so the
//! session layer merely warns the human player, and the computer opponent
//! skips the warning entirely.

pub mod attack;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod sliding;

use crate::board::Board;
use crate::constants::{BISHOP_DIRS, QUEEN_DIRS, ROOK_DIRS};
use crate::piece::{ComboState, Piece};
use crate::skills::SkillId;
use crate::types::{LastMove, MoveCandidate, MoveKind, PieceColor, PieceType, Square};

/// All moves the piece on `from` could make, ignoring king safety.
///
/// Returns an empty list for an empty square. `include_castling` is turned
/// off when the generator runs inside the attack oracle, where castling is
/// irrelevant and would recurse.
pub fn pseudo_moves(
    board: &Board,
    from: Square,
    last_move: Option<&LastMove>,
    include_castling: bool,
) -> Vec<MoveCandidate> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    let mut moves = match piece.kind {
        PieceType::Pawn => pawn::moves(board, from, piece, last_move),
        PieceType::Knight => knight::leap_moves(board, from, piece, false),
        PieceType::Rook => {
            let mut moves = sliding::ray_moves(board, from, piece, &ROOK_DIRS);
            if piece.has_skill(SkillId::Cqc) {
                moves.extend(king::ring_moves(board, from, piece));
            }
            moves
        }
        PieceType::Bishop => {
            let mut moves = sliding::ray_moves(board, from, piece, &BISHOP_DIRS);
            if piece.has_skill(SkillId::Cqc) {
                moves.extend(king::ring_moves(board, from, piece));
            }
            if piece.has_skill(SkillId::PaladinsSword) {
                moves.extend(knight::leap_moves(board, from, piece, true));
            }
            moves
        }
        PieceType::Queen => {
            let mut moves = sliding::ray_moves(board, from, piece, &QUEEN_DIRS);
            if piece.has_skill(SkillId::Amazon) {
                moves.extend(knight::leap_moves(board, from, piece, true));
            }
            moves
        }
        PieceType::King => king::moves(board, from, piece, include_castling),
    };

    // Combo Stance: the turn after a capture the piece also moves with a
    // queen's range.
    if combo_armed(piece) {
        moves.extend(sliding::ray_moves(board, from, piece, &QUEEN_DIRS));
    }

    moves
}

fn combo_armed(piece: &Piece) -> bool {
    piece.has_skill(SkillId::ComboStance) && piece.combo == ComboState::Active
}

/// Pseudo moves with castling-specific legality applied: castling is
/// rejected when the square the king crosses is under attack.
pub fn legal_moves(
    board: &Board,
    from: Square,
    last_move: Option<&LastMove>,
) -> Vec<MoveCandidate> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };
    let enemy = piece.color.opposite();
    let mut moves = pseudo_moves(board, from, last_move, true);
    moves.retain(|mv| {
        let crossing = match mv.kind {
            MoveKind::CastleKingside => Some(Square::new(mv.from.row, 5)),
            MoveKind::CastleQueenside => Some(Square::new(mv.from.row, 3)),
            _ => None,
        };
        match crossing {
            Some(sq) => !attack::is_square_attacked(board, sq, enemy),
            None => true,
        }
    });
    moves
}

/// All legal moves for one side, paired with their origin pieces' squares.
pub fn all_legal_moves(
    board: &Board,
    color: PieceColor,
    last_move: Option<&LastMove>,
) -> Vec<MoveCandidate> {
    let mut moves = Vec::new();
    for (sq, piece) in board.iter() {
        if piece.color == color {
            moves.extend(legal_moves(board, sq, last_move));
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_position_move_count() {
        // 8 pawns x 2 pushes + 2 knights x 2 leaps.
        let board = Board::standard();
        assert_eq!(all_legal_moves(&board, PieceColor::White, None).len(), 20);
        assert_eq!(all_legal_moves(&board, PieceColor::Black, None).len(), 20);
    }

    #[test]
    fn test_empty_square_yields_no_moves() {
        let board = Board::standard();
        assert!(pseudo_moves(&board, Square::new(4, 4), None, true).is_empty());
    }

    #[test]
    fn test_combo_stance_grants_queen_range_when_active() {
        let mut board = Board::empty();
        let from = Square::new(4, 4);
        board.set(from, Piece::new(PieceType::Knight, PieceColor::White));
        {
            let knight = board.get_mut(from).unwrap();
            knight.learn(SkillId::ComboStance);
            knight.combo = ComboState::Active;
        }
        let moves = pseudo_moves(&board, from, None, true);
        // Ray moves on top of the 8 leaps.
        assert!(moves.iter().any(|m| m.to == Square::new(4, 0)));
        assert!(moves.iter().any(|m| m.to == Square::new(0, 0)));
        // Pending is not enough.
        board.get_mut(from).unwrap().combo = ComboState::Pending;
        let moves = pseudo_moves(&board, from, None, true);
        assert!(!moves.iter().any(|m| m.to == Square::new(4, 0)));
    }

    #[test]
    fn test_castling_through_attacked_square_rejected() {
        let mut board = Board::empty();
        board.set(Square::new(7, 4), Piece::new(PieceType::King, PieceColor::White));
        board.set(Square::new(7, 7), Piece::new(PieceType::Rook, PieceColor::White));
        // Black rook eyes the f1 crossing square.
        board.set(Square::new(0, 5), Piece::new(PieceType::Rook, PieceColor::Black));
        let moves = legal_moves(&board, Square::new(7, 4), None);
        assert!(!moves.iter().any(|m| m.kind == MoveKind::CastleKingside));
        // Shape-level generation still offers it.
        let pseudo = pseudo_moves(&board, Square::new(7, 4), None, true);
        assert!(pseudo.iter().any(|m| m.kind == MoveKind::CastleKingside));
    }
}
