//! Core type definitions: colors, piece kinds, squares, and move candidates.
//!
//! Piece kind is a plain enum tag; movement generation dispatches on the tag
//! plus the piece's skill set rather than through virtual methods.

use crate::constants::BOARD_SIZE;
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two sides. White starts on rows 6-7, Black on rows 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Row delta of a forward step for this side.
    pub fn forward(self) -> i8 {
        match self {
            PieceColor::White => -1,
            PieceColor::Black => 1,
        }
    }

    /// Rank of `row` from this side's perspective (1 = own baseline,
    /// 8 = enemy baseline).
    pub fn rank_of_row(self, row: u8) -> u8 {
        match self {
            PieceColor::White => 8 - row,
            PieceColor::Black => row + 1,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceColor::White => write!(f, "White"),
            PieceColor::Black => write!(f, "Black"),
        }
    }
}

/// Piece kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    /// Piece kinds a pawn may promote to.
    pub const PROMOTION_CHOICES: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PieceType::Pawn => "Pawn",
            PieceType::Rook => "Rook",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Board coordinate. Row 0 / col 0 is the a8 corner (Black's home rank);
/// algebraic rank is `8 - row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Create a square; panics on out-of-range coordinates (use
    /// [`Square::try_new`] for untrusted input).
    pub fn new(row: u8, col: u8) -> Self {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE, "square out of bounds");
        Square { row, col }
    }

    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Offset by (row delta, col delta), returning `None` off the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Square::try_new(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// Flat 0-63 index, row-major from a8.
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// Algebraic notation, e.g. `e4`.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.col) as char, 8 - self.row)
    }

    /// Parses algebraic notation (`a1` through `h8`) from untrusted input.
    pub fn from_algebraic(s: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidSquare {
            input: s.to_string(),
        };
        let mut chars = s.chars();
        let file = chars.next().ok_or_else(invalid)?;
        let rank = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(invalid)? as u8;
        if !('a'..='h').contains(&file) || !(1..=8).contains(&rank) || chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Square {
            row: 8 - rank,
            col: file as u8 - b'a',
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

/// What a candidate move does to the board, with kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Relocate to an empty square.
    Normal,
    /// Relocate onto an enemy piece, capturing it.
    Capture,
    /// Capture the pawn that just double-stepped past this one.
    EnPassant,
    /// King to the g-file, rook hops to f.
    CastleKingside,
    /// King to the c-file, rook hops to d.
    CastleQueenside,
    /// Relocation granted by a skill (may land on an enemy, capturing it).
    SkillMove,
    /// Non-relocating promotion pseudo-move (Field Promotion skill).
    FieldPromotion,
    /// Swap with the ally on the destination; the ally lands on `push_back`.
    CrossSwitch { push_back: Square },
    /// Crush every enemy on `crushed` and land on the first empty square
    /// beyond them (Tyrant's March skill).
    TyrantMarch { crushed: Vec<Square> },
    /// Capture the enemy on `first` and the one immediately behind it,
    /// landing on the far square (Piercing skill).
    PierceCapture { first: Square },
}

impl MoveKind {
    /// Whether executing this move can remove at least one enemy piece.
    pub fn is_aggressive(&self) -> bool {
        matches!(
            self,
            MoveKind::Capture
                | MoveKind::EnPassant
                | MoveKind::PierceCapture { .. }
                | MoveKind::TyrantMarch { .. }
        )
    }
}

/// A candidate move: origin, destination, and board effect.
///
/// Candidates describe legal *shape* only; check-safety filtering is the
/// caller's responsibility (and deliberately skipped on the AI path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCandidate {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl MoveCandidate {
    pub fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        MoveCandidate { from, to, kind }
    }
}

/// The previous executed move, retained for en-passant legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub mover: PieceType,
    pub from: Square,
    pub to: Square,
}

/// Final outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    pub fn winner(self) -> Option<PieceColor> {
        match self {
            GameResult::WhiteWins => Some(PieceColor::White),
            GameResult::BlackWins => Some(PieceColor::Black),
            GameResult::Draw => None,
        }
    }

    pub fn win_for(color: PieceColor) -> Self {
        match color {
            PieceColor::White => GameResult::WhiteWins,
            PieceColor::Black => GameResult::BlackWins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_algebraic_round_trip() {
        let sq = Square::from_algebraic("e4").unwrap();
        assert_eq!(sq, Square::new(4, 4));
        assert_eq!(sq.to_algebraic(), "e4");

        assert_eq!(Square::from_algebraic("a8").unwrap(), Square::new(0, 0));
        assert_eq!(Square::from_algebraic("h1").unwrap(), Square::new(7, 7));
        for bad in ["i3", "a9", "e", "e44", ""] {
            assert!(matches!(
                Square::from_algebraic(bad),
                Err(EngineError::InvalidSquare { .. })
            ));
        }
    }

    #[test]
    fn test_square_offset_bounds() {
        let corner = Square::new(0, 0);
        assert!(corner.offset(-1, 0).is_none());
        assert!(corner.offset(0, -1).is_none());
        assert_eq!(corner.offset(1, 1), Some(Square::new(1, 1)));
    }

    #[test]
    fn test_rank_perspective() {
        // White pawn on its start row is on rank 2 from White's view.
        assert_eq!(PieceColor::White.rank_of_row(6), 2);
        // The same row is rank 7 from Black's view.
        assert_eq!(PieceColor::Black.rank_of_row(6), 7);
        assert_eq!(PieceColor::White.rank_of_row(0), 8);
        assert_eq!(PieceColor::Black.rank_of_row(7), 8);
    }

    #[test]
    fn test_aggressive_move_kinds() {
        assert!(MoveKind::Capture.is_aggressive());
        assert!(MoveKind::TyrantMarch {
            crushed: vec![Square::new(3, 3)]
        }
        .is_aggressive());
        assert!(!MoveKind::Normal.is_aggressive());
        assert!(!MoveKind::CrossSwitch {
            push_back: Square::new(3, 3)
        }
        .is_aggressive());
    }
}
