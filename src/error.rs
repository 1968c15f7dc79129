//! Error types for the engine.
//!
//! Errors cover structural API misuse only. Illegal move *requests* are not
//! errors: attempting a destination outside the current legal-move set is
//! reported through [`AttemptOutcome`](crate::game::session::AttemptOutcome)
//! and leaves the board untouched.

use crate::game::turn::TurnPhase;
use crate::types::Square;
use thiserror::Error;

/// Errors that can occur when driving the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A string that does not name a square on the 8x8 grid.
    #[error("not a square: {input:?}")]
    InvalidSquare { input: String },

    /// No piece occupies the addressed square.
    #[error("no piece at {square}")]
    NoPieceAt { square: Square },

    /// A `resolve_*` command was issued while no matching interrupt is
    /// pending.
    #[error("operation not valid in phase {actual:?} (requires {expected:?})")]
    WrongPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },

    /// The supplied choice is not among the offered candidates.
    #[error("choice is not among the offered candidates")]
    InvalidChoice,

    /// The game has already ended.
    #[error("game is over")]
    GameOver,
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
