//! Board representation.
//!
//! An 8x8 grid stored as a flat array of 64 optional pieces, row-major with
//! row 0 at the top (Black's back rank) to match the coordinate convention
//! used throughout the engine. Cloning a board deep-copies every piece, so
//! search can simulate on clones without touching live state.

use crate::piece::Piece;
use crate::types::{MoveCandidate, MoveKind, PieceColor, PieceType, Square};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: std::array::from_fn(|_| None),
        }
    }

    /// Standard chess starting position. Black occupies rows 0-1,
    /// White rows 6-7.
    pub fn standard() -> Self {
        use PieceType::*;
        let mut board = Self::empty();
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for (col, &kind) in back_rank.iter().enumerate() {
            let col = col as u8;
            board.set(Square::new(0, col), Piece::new(kind, PieceColor::Black));
            board.set(Square::new(1, col), Piece::new(Pawn, PieceColor::Black));
            board.set(Square::new(6, col), Piece::new(Pawn, PieceColor::White));
            board.set(Square::new(7, col), Piece::new(kind, PieceColor::White));
        }
        board
    }

    pub fn get(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.index()].as_ref()
    }

    pub fn get_mut(&mut self, sq: Square) -> Option<&mut Piece> {
        self.squares[sq.index()].as_mut()
    }

    pub fn set(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
    }

    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Moves a piece from one square to another, marking it as having moved
    /// and returning whatever occupied the destination. A degenerate move
    /// with `from == to` only marks the piece and returns `None`.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        if from == to {
            if let Some(piece) = self.get_mut(from) {
                piece.has_moved = true;
            }
            return None;
        }
        let mut piece = self.take(from)?;
        piece.has_moved = true;
        self.squares[to.index()].replace(piece)
    }

    /// All occupied squares with their pieces.
    pub fn iter(&self) -> impl Iterator<Item = (Square, &Piece)> {
        self.squares.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .map(|p| (Square::new((i / 8) as u8, (i % 8) as u8), p))
        })
    }

    pub fn position_of(&self, id: Uuid) -> Option<Square> {
        self.iter().find(|(_, p)| p.id == id).map(|(sq, _)| sq)
    }

    pub fn find_royal(&self, color: PieceColor) -> Option<(Square, &Piece)> {
        self.iter().find(|(_, p)| p.color == color && p.is_royal)
    }

    pub fn count_pieces(&self, color: PieceColor) -> usize {
        self.iter().filter(|(_, p)| p.color == color).count()
    }

    /// Executes a move mechanically and returns every piece it removed from
    /// the board. Turn bookkeeping (XP, level-ups, royal capture, combo)
    /// belongs to the caller.
    pub fn apply(&mut self, mv: &MoveCandidate) -> Vec<Piece> {
        let mut victims = Vec::new();
        match &mv.kind {
            MoveKind::Normal | MoveKind::Capture | MoveKind::SkillMove => {
                victims.extend(self.relocate(mv.from, mv.to));
            }
            MoveKind::FieldPromotion => {
                // Promotion itself happens at the session layer; here the
                // piece merely spends its move in place.
                self.relocate(mv.from, mv.from);
            }
            MoveKind::EnPassant => {
                let victim_sq = Square::new(mv.from.row, mv.to.col);
                victims.extend(self.take(victim_sq));
                self.relocate(mv.from, mv.to);
            }
            MoveKind::CastleKingside => {
                self.relocate(mv.from, mv.to);
                let row = mv.from.row;
                self.relocate(Square::new(row, 7), Square::new(row, 5));
            }
            MoveKind::CastleQueenside => {
                self.relocate(mv.from, mv.to);
                let row = mv.from.row;
                self.relocate(Square::new(row, 0), Square::new(row, 3));
            }
            MoveKind::CrossSwitch { push_back } => {
                // Both pieces count as having moved.
                let mover = self.take(mv.from);
                let ally = self.take(mv.to);
                if let Some(mut mover) = mover {
                    mover.has_moved = true;
                    self.set(mv.to, mover);
                }
                if let Some(mut ally) = ally {
                    ally.has_moved = true;
                    self.set(*push_back, ally);
                }
            }
            MoveKind::TyrantMarch { crushed } => {
                for &sq in crushed {
                    victims.extend(self.take(sq));
                }
                self.relocate(mv.from, mv.to);
            }
            MoveKind::PierceCapture { first } => {
                victims.extend(self.take(*first));
                victims.extend(self.relocate(mv.from, mv.to));
            }
        }
        victims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_setup() {
        let board = Board::standard();
        assert_eq!(board.count_pieces(PieceColor::White), 16);
        assert_eq!(board.count_pieces(PieceColor::Black), 16);
        let king = board.get(Square::new(7, 4)).unwrap();
        assert_eq!(king.kind, PieceType::King);
        assert_eq!(king.color, PieceColor::White);
        assert!(king.is_royal);
        assert_eq!(
            board.find_royal(PieceColor::Black).unwrap().0,
            Square::new(0, 4)
        );
    }

    #[test]
    fn test_clone_is_deep() {
        let board = Board::standard();
        let mut copy = board.clone();
        let sq = Square::new(6, 0);
        copy.get_mut(sq).unwrap().add_xp(999);
        copy.take(Square::new(1, 0));
        assert_eq!(board.get(sq).unwrap().xp, 0);
        assert!(board.get(Square::new(1, 0)).is_some());
    }

    #[test]
    fn test_relocate_marks_moved_and_returns_occupant() {
        let mut board = Board::standard();
        let from = Square::new(6, 4);
        let to = Square::new(4, 4);
        assert!(board.relocate(from, to).is_none());
        assert!(board.get(to).unwrap().has_moved);
        assert!(board.is_empty_at(from));
    }

    #[test]
    fn test_en_passant_removes_bypassed_pawn() {
        let mut board = Board::empty();
        board.set(Square::new(3, 4), Piece::new(PieceType::Pawn, PieceColor::White));
        board.set(Square::new(3, 5), Piece::new(PieceType::Pawn, PieceColor::Black));
        let mv = MoveCandidate {
            from: Square::new(3, 4),
            to: Square::new(2, 5),
            kind: MoveKind::EnPassant,
        };
        let victims = board.apply(&mv);
        assert_eq!(victims.len(), 1);
        assert_eq!(victims[0].color, PieceColor::Black);
        assert!(board.is_empty_at(Square::new(3, 5)));
        assert!(board.get(Square::new(2, 5)).is_some());
    }

    #[test]
    fn test_castle_kingside_moves_rook() {
        let mut board = Board::empty();
        board.set(Square::new(7, 4), Piece::new(PieceType::King, PieceColor::White));
        board.set(Square::new(7, 7), Piece::new(PieceType::Rook, PieceColor::White));
        let mv = MoveCandidate {
            from: Square::new(7, 4),
            to: Square::new(7, 6),
            kind: MoveKind::CastleKingside,
        };
        assert!(board.apply(&mv).is_empty());
        assert_eq!(board.get(Square::new(7, 6)).unwrap().kind, PieceType::King);
        assert_eq!(board.get(Square::new(7, 5)).unwrap().kind, PieceType::Rook);
        assert!(board.is_empty_at(Square::new(7, 7)));
    }

    #[test]
    fn test_cross_switch_swaps_and_pushes() {
        let mut board = Board::empty();
        board.set(Square::new(7, 0), Piece::new(PieceType::Rook, PieceColor::White));
        board.set(Square::new(4, 0), Piece::new(PieceType::Pawn, PieceColor::White));
        let mv = MoveCandidate {
            from: Square::new(7, 0),
            to: Square::new(4, 0),
            kind: MoveKind::CrossSwitch {
                push_back: Square::new(5, 0),
            },
        };
        board.apply(&mv);
        assert_eq!(board.get(Square::new(4, 0)).unwrap().kind, PieceType::Rook);
        assert_eq!(board.get(Square::new(5, 0)).unwrap().kind, PieceType::Pawn);
        assert!(board.is_empty_at(Square::new(7, 0)));
    }

    #[test]
    fn test_tyrant_march_removes_crushed_line() {
        let mut board = Board::empty();
        board.set(Square::new(7, 0), Piece::new(PieceType::Rook, PieceColor::White));
        board.set(Square::new(5, 0), Piece::new(PieceType::Pawn, PieceColor::Black));
        board.set(Square::new(4, 0), Piece::new(PieceType::Knight, PieceColor::Black));
        let mv = MoveCandidate {
            from: Square::new(7, 0),
            to: Square::new(3, 0),
            kind: MoveKind::TyrantMarch {
                crushed: vec![Square::new(5, 0), Square::new(4, 0)],
            },
        };
        let victims = board.apply(&mv);
        assert_eq!(victims.len(), 2);
        assert_eq!(board.get(Square::new(3, 0)).unwrap().kind, PieceType::Rook);
        assert!(board.is_empty_at(Square::new(5, 0)));
        assert!(board.is_empty_at(Square::new(4, 0)));
    }

    #[test]
    fn test_pierce_capture_removes_both() {
        let mut board = Board::empty();
        board.set(Square::new(7, 0), Piece::new(PieceType::Rook, PieceColor::White));
        board.set(Square::new(5, 0), Piece::new(PieceType::Pawn, PieceColor::Black));
        board.set(Square::new(4, 0), Piece::new(PieceType::Bishop, PieceColor::Black));
        let mv = MoveCandidate {
            from: Square::new(7, 0),
            to: Square::new(4, 0),
            kind: MoveKind::PierceCapture {
                first: Square::new(5, 0),
            },
        };
        let victims = board.apply(&mv);
        assert_eq!(victims.len(), 2);
        assert_eq!(board.get(Square::new(4, 0)).unwrap().kind, PieceType::Rook);
        assert!(board.is_empty_at(Square::new(5, 0)));
    }
}
