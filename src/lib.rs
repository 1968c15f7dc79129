//! # skillchess - RPG Chess Variant Engine
//!
//! A turn-based 8x8 strategy game layered on chess movement rules, extended
//! with an RPG-style progression mechanic: pieces earn experience from combat
//! and positioning, level up, and probabilistically acquire *skills* that
//! permanently alter their movement, combat, or turn-economy rules.
//!
//! The crate is a pure in-process engine. Rendering, input handling, and
//! dialog presentation are the caller's job: the caller feeds user intent in
//! through command operations on [`GameSession`] and reacts to the
//! [`GameEvent`] notification stream drained via
//! [`GameSession::take_events`].
//!
//! ## Architecture
//!
//! - [`board`] / [`piece`] - the mutable grid of piece entities and their RPG
//!   state; no rules knowledge.
//! - [`move_gen`] - per-piece-type candidate move generation, including all
//!   skill-conditioned variants, plus the attack/check oracle.
//! - [`skills`] / [`progression`] - skill definitions, the injected
//!   [`SkillRegistry`], XP accounting, and the tiered probabilistic draw.
//! - [`game`] - the turn/combat resolution state machine: move execution,
//!   capture resolution, level-up interrupts, decoy/succession/sacrifice
//!   handling, extra-turn grants, and turn handoff.
//! - [`search`] - the computer opponent: minimax with alpha-beta pruning,
//!   capture-only quiescence, and a growth-aware evaluation function.
//!
//! ## Single-threaded by contract
//!
//! The engine runs on one logical thread of control. The board is exclusively
//! owned by the session; the search operates only on throwaway clones. The
//! resolution state machine pauses deterministically at its interrupt points
//! (promotion choice, decoy choice, skill choice) and resumes through a
//! single `resolve_*` command once the external choice arrives.

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod move_gen;
pub mod piece;
pub mod progression;
pub mod search;
pub mod skills;
pub mod types;

pub use board::Board;
pub use error::{EngineError, EngineResult};
pub use game::events::{GameEvent, LogCategory, LogEntry};
pub use game::session::{AttemptOutcome, GameConfig, GameMode, GameSession};
pub use game::turn::TurnPhase;
pub use piece::{ComboState, Piece};
pub use progression::LevelProgress;
pub use search::Difficulty;
pub use skills::registry::SkillRegistry;
pub use skills::{SkillCategory, SkillId};
pub use types::{GameResult, LastMove, MoveCandidate, MoveKind, PieceColor, PieceType, Square};
