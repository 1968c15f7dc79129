//! Outbound notifications.
//!
//! The session appends events to an internal buffer as it resolves moves;
//! the caller drains them with [`GameSession::take_events`] after every
//! command and renders them however it likes. Events are notifications
//! only: everything they report has already happened to the board.
//!
//! [`GameSession::take_events`]: crate::game::session::GameSession::take_events

use crate::skills::SkillId;
use crate::types::{GameResult, MoveCandidate, PieceColor, PieceType, Square};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Log line flavor, used by callers for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogCategory {
    Normal,
    Capture,
    Skill,
    LevelUp,
    Warning,
}

/// A human-readable battle log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub category: LogCategory,
    /// Side the line concerns, when there is one.
    pub color: Option<PieceColor>,
    pub message: String,
    /// Move endpoints, set on move and capture lines so a replay viewer can
    /// highlight the squares.
    pub from_to: Option<(Square, Square)>,
}

impl LogEntry {
    pub fn new(category: LogCategory, color: Option<PieceColor>, message: impl Into<String>) -> Self {
        Self {
            category,
            color,
            message: message.into(),
            from_to: None,
        }
    }

    pub fn with_move(mut self, from: Square, to: Square) -> Self {
        self.from_to = Some((from, to));
        self
    }
}

/// Everything the session reports back to its driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Log(LogEntry),
    /// A move finished executing on the board.
    MoveExecuted {
        mv: MoveCandidate,
        color: PieceColor,
    },
    /// A piece captured or crushed this many enemies with one move.
    PiecesCaptured {
        captor: Uuid,
        count: usize,
    },
    PieceLeveledUp {
        piece: Uuid,
        at: Square,
        level: u8,
    },
    /// The session paused; answer with `resolve_skill_choice`.
    SkillChoicesOffered {
        piece: Uuid,
        choices: Vec<SkillId>,
    },
    SkillLearned {
        piece: Uuid,
        skill: SkillId,
    },
    /// The session paused; answer with `resolve_promotion`.
    PromotionRequired {
        color: PieceColor,
        at: Square,
    },
    Promoted {
        piece: Uuid,
        kind: PieceType,
    },
    /// The session paused; answer with `resolve_decoy`.
    DecoyChoiceRequired {
        color: PieceColor,
        candidates: Vec<Square>,
    },
    DecoyActivated {
        royal: Uuid,
        at: Square,
    },
    SuccessionActivated {
        heir: Uuid,
    },
    SacrificeTriggered {
        victim: Uuid,
    },
    /// The side to move starts its turn with its royal piece attacked.
    CheckNotice {
        color: PieceColor,
        royal_at: Square,
    },
    /// A bonus action is available (Tactical Breakthrough).
    ExtraTurn {
        color: PieceColor,
        actions_remaining: u32,
    },
    /// The restricted piece had no safe move; the bonus action lapsed.
    ExtraTurnForfeited {
        color: PieceColor,
    },
    TurnChanged {
        side_to_move: PieceColor,
        turn: u32,
    },
    GameEnded {
        result: GameResult,
    },
}

impl GameEvent {
    pub fn log(category: LogCategory, color: Option<PieceColor>, message: impl Into<String>) -> Self {
        GameEvent::Log(LogEntry::new(category, color, message))
    }
}
