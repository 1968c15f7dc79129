//! Turn phases.
//!
//! The session is a synchronous state machine that pauses whenever it needs
//! an external decision. The phase tells the caller which command the
//! session will accept next.

use serde::{Deserialize, Serialize};

/// What the session is currently waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the side to move to pick a move (or for the driver to
    /// run the computer's turn).
    AwaitingMove,
    /// A requested move would leave the mover's royal piece attacked;
    /// waiting for confirm or cancel.
    AwaitingConfirmation,
    /// A pawn reached the far rank or used Field Promotion; waiting for the
    /// promotion piece choice.
    AwaitingPromotion,
    /// A royal piece with Decoy was captured; waiting for the substitute
    /// ally choice.
    AwaitingDecoy,
    /// A piece leveled up; waiting for the skill pick.
    AwaitingSkillChoice,
    /// The game has ended. No further commands are accepted.
    GameOver,
}

impl TurnPhase {
    /// Whether the session accepts a fresh move in this phase.
    pub fn accepts_moves(self) -> bool {
        self == TurnPhase::AwaitingMove
    }

    /// Whether the session is paused mid-resolution on an external choice.
    pub fn is_interrupt(self) -> bool {
        matches!(
            self,
            TurnPhase::AwaitingConfirmation
                | TurnPhase::AwaitingPromotion
                | TurnPhase::AwaitingDecoy
                | TurnPhase::AwaitingSkillChoice
        )
    }
}
