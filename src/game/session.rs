//! The game session: move execution, combat resolution, progression
//! interrupts, and turn handoff.
//!
//! A session is a synchronous state machine. Commands (`attempt_move`,
//! `resolve_*`, `play_computer_turn`) drive it forward; whenever resolution
//! needs an external decision it parks the remaining work in a pending slot,
//! switches [`TurnPhase`], and returns. The matching `resolve_*` command
//! picks the work back up. Choices owned by the computer side are resolved
//! inline (auto-queen promotion, random decoy substitute, first drawn
//! skill), so a computer move always runs to completion in one call.
//!
//! Combat resolution processes every victim of a move in order: Sacrifice
//! drags the captor down, a captured royal may trigger Decoy (a substitute
//! ally takes the fall) or Succession (an heir queen inherits the crown),
//! and only a royal with neither ends the game. XP is summed over all
//! victims and applied once, after which level-up checks run one level at a
//! time, re-checking after every granted skill.

use crate::board::Board;
use crate::constants::{DEFAULT_MAX_TURNS, MOVE_ACTION_XP};
use crate::error::{EngineError, EngineResult};
use crate::game::events::{GameEvent, LogCategory, LogEntry};
use crate::game::turn::TurnPhase;
use crate::move_gen::{self, attack};
use crate::piece::{ComboState, Piece};
use crate::progression::{
    capture_award, check_level_up, fast_learner_xp, rank_xp, survival_instinct_xp, LevelProgress,
};
use crate::search::{self, evaluate, Difficulty};
use crate::skills::registry::SkillRegistry;
use crate::skills::SkillId;
use crate::types::{
    GameResult, LastMove, MoveCandidate, MoveKind, PieceColor, PieceType, Square,
};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};
use uuid::Uuid;

/// Who plays each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    HumanVsHuman,
    HumanVsComputer { computer: PieceColor },
}

/// Session parameters, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Full turns (both sides) before sudden death decides the game on
    /// material.
    pub max_turns: u32,
    /// Seed for every random draw in the session. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::HumanVsHuman,
            difficulty: Difficulty::default(),
            max_turns: DEFAULT_MAX_TURNS,
            seed: None,
        }
    }
}

/// What became of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Executed. The session may now be paused on an interrupt.
    Applied,
    /// The move would leave the mover's royal piece attacked. Answer with
    /// `confirm_move` or `cancel_move`.
    ConfirmationRequired,
    /// Not a legal move for the side to move right now. Board unchanged.
    Rejected,
}

/// Combat state carried across an interrupt pause.
struct Resolution {
    captor: Uuid,
    /// Snapshot of the captor at execution time, for award math and the
    /// royal check even if the captor dies mid-resolution.
    captor_snapshot: Piece,
    victims: VecDeque<Piece>,
    xp_gained: u32,
    captured_any: bool,
    consumed_restriction: bool,
}

/// Parked work while the session waits on an external choice.
enum Pending {
    Confirmation {
        mv: MoveCandidate,
    },
    Promotion {
        at: Square,
        resolution: Resolution,
    },
    Decoy {
        royal: Piece,
        candidates: Vec<Square>,
        resolution: Resolution,
    },
    SkillChoice {
        piece: Uuid,
        choices: Vec<SkillId>,
    },
}

/// What to run once the level-up queue drains.
enum AfterLevelUps {
    Nothing,
    FinishAction { consumed_restriction: bool },
    TurnStarted,
}

pub struct GameSession {
    board: Board,
    registry: SkillRegistry,
    config: GameConfig,
    side_to_move: PieceColor,
    turn: u32,
    last_move: Option<LastMove>,
    phase: TurnPhase,
    actions_remaining: u32,
    restricted_piece: Option<Uuid>,
    extra_turn_pending: bool,
    pending: Option<Pending>,
    levelup_queue: VecDeque<Uuid>,
    after_levelups: AfterLevelUps,
    events: Vec<GameEvent>,
    rng: StdRng,
    result: Option<GameResult>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self::with_registry(config, SkillRegistry::standard())
    }

    pub fn with_registry(config: GameConfig, registry: SkillRegistry) -> Self {
        Self::from_position(config, registry, Board::standard())
    }

    /// Starts from an arbitrary position with White to move. Useful for
    /// puzzle setups and scenario drivers.
    pub fn from_position(config: GameConfig, registry: SkillRegistry, board: Board) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(?config.mode, difficulty = ?config.difficulty, "starting game");
        Self {
            board,
            registry,
            config,
            side_to_move: PieceColor::White,
            turn: 1,
            last_move: None,
            phase: TurnPhase::AwaitingMove,
            actions_remaining: 1,
            restricted_piece: None,
            extra_turn_pending: false,
            pending: None,
            levelup_queue: VecDeque::new(),
            after_levelups: AfterLevelUps::Nothing,
            events: Vec::new(),
            rng,
            result: None,
        }
    }

    // ------------------------------------------------------------------
    //  Accessors
    // ------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn registry(&self) -> &SkillRegistry {
        &self.registry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.side_to_move
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    pub fn actions_remaining(&self) -> u32 {
        self.actions_remaining
    }

    /// The only piece allowed to act during a bonus action, if any.
    pub fn restricted_piece(&self) -> Option<Uuid> {
        self.restricted_piece
    }

    /// Squares of the allies offered as decoy substitutes, while paused in
    /// [`TurnPhase::AwaitingDecoy`].
    pub fn decoy_candidates(&self) -> Option<&[Square]> {
        match &self.pending {
            Some(Pending::Decoy { candidates, .. }) => Some(candidates),
            _ => None,
        }
    }

    /// Skills on offer while paused in [`TurnPhase::AwaitingSkillChoice`].
    pub fn pending_skill_choices(&self) -> Option<&[SkillId]> {
        match &self.pending {
            Some(Pending::SkillChoice { choices, .. }) => Some(choices),
            _ => None,
        }
    }

    /// Drains everything the session reported since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Level progress of the piece on `sq`, for progress bars and tooltips.
    pub fn level_progress_at(&self, sq: Square) -> Option<LevelProgress> {
        self.board.get(sq).map(crate::progression::level_progress)
    }

    /// Picks a move for the side to move without executing it. Advances the
    /// session's RNG but changes nothing else; `play_computer_turn` both
    /// picks and executes.
    pub fn request_computer_move(&mut self) -> Option<MoveCandidate> {
        if self.result.is_some() || !self.phase.accepts_moves() {
            return None;
        }
        search::select_move(
            &self.board,
            self.side_to_move,
            self.config.difficulty,
            self.last_move.as_ref(),
            self.restricted_piece,
            &mut self.rng,
        )
    }

    /// Moves the piece on `from` may make right now, honoring turn order
    /// and the bonus-action restriction.
    pub fn available_moves(&self, from: Square) -> Vec<MoveCandidate> {
        if self.result.is_some() || !self.phase.accepts_moves() {
            return Vec::new();
        }
        let Some(piece) = self.board.get(from) else {
            return Vec::new();
        };
        if piece.color != self.side_to_move {
            return Vec::new();
        }
        if self.restricted_piece.is_some_and(|id| id != piece.id) {
            return Vec::new();
        }
        move_gen::legal_moves(&self.board, from, self.last_move.as_ref())
    }

    fn is_human(&self, color: PieceColor) -> bool {
        match self.config.mode {
            GameMode::HumanVsHuman => true,
            GameMode::HumanVsComputer { computer } => color != computer,
        }
    }

    // ------------------------------------------------------------------
    //  Commands
    // ------------------------------------------------------------------

    /// Requests a move for the side to move.
    ///
    /// A structurally valid but illegal request is `Rejected`, not an
    /// error. A legal move that leaves the mover's royal piece attacked
    /// pauses for confirmation when the mover is human; royal capture ends
    /// the game here, so walking into check is allowed but warned about.
    pub fn attempt_move(&mut self, mv: &MoveCandidate) -> EngineResult<AttemptOutcome> {
        self.ensure_phase(TurnPhase::AwaitingMove)?;
        let piece = self
            .board
            .get(mv.from)
            .ok_or(EngineError::NoPieceAt { square: mv.from })?;
        if piece.color != self.side_to_move {
            return Ok(AttemptOutcome::Rejected);
        }
        if self.restricted_piece.is_some_and(|id| id != piece.id) {
            self.log(
                LogCategory::Warning,
                Some(self.side_to_move),
                "only the piece that earned the bonus action may act",
            );
            return Ok(AttemptOutcome::Rejected);
        }
        let legal = move_gen::legal_moves(&self.board, mv.from, self.last_move.as_ref());
        if !legal.contains(mv) {
            return Ok(AttemptOutcome::Rejected);
        }

        let mover = self.side_to_move;
        if self.is_human(mover) && attack::would_cause_check(&self.board, mv, mover) {
            self.log(
                LogCategory::Warning,
                Some(mover),
                "this move leaves your royal piece attacked",
            );
            self.pending = Some(Pending::Confirmation { mv: mv.clone() });
            self.phase = TurnPhase::AwaitingConfirmation;
            return Ok(AttemptOutcome::ConfirmationRequired);
        }

        self.execute_move(mv.clone());
        Ok(AttemptOutcome::Applied)
    }

    /// Executes the move that was parked for a self-check confirmation.
    pub fn confirm_move(&mut self) -> EngineResult<()> {
        self.ensure_phase(TurnPhase::AwaitingConfirmation)?;
        let Some(Pending::Confirmation { mv }) = self.pending.take() else {
            return Err(EngineError::InvalidChoice);
        };
        self.phase = TurnPhase::AwaitingMove;
        self.execute_move(mv);
        Ok(())
    }

    /// Abandons the parked move and returns to normal input.
    pub fn cancel_move(&mut self) -> EngineResult<()> {
        self.ensure_phase(TurnPhase::AwaitingConfirmation)?;
        self.pending = None;
        self.phase = TurnPhase::AwaitingMove;
        Ok(())
    }

    /// Answers [`TurnPhase::AwaitingPromotion`] with the chosen piece kind.
    pub fn resolve_promotion(&mut self, kind: PieceType) -> EngineResult<()> {
        self.ensure_phase(TurnPhase::AwaitingPromotion)?;
        if !PieceType::PROMOTION_CHOICES.contains(&kind) {
            return Err(EngineError::InvalidChoice);
        }
        let Some(Pending::Promotion { at, resolution }) = self.pending.take() else {
            return Err(EngineError::InvalidChoice);
        };
        self.phase = TurnPhase::AwaitingMove;
        self.promote_piece(at, kind);
        self.resolve_combat(resolution);
        Ok(())
    }

    /// Answers [`TurnPhase::AwaitingDecoy`] with the substitute's square.
    pub fn resolve_decoy(&mut self, substitute: Square) -> EngineResult<()> {
        self.ensure_phase(TurnPhase::AwaitingDecoy)?;
        let valid = matches!(
            &self.pending,
            Some(Pending::Decoy { candidates, .. }) if candidates.contains(&substitute)
        );
        if !valid {
            return Err(EngineError::InvalidChoice);
        }
        let Some(Pending::Decoy {
            royal,
            mut resolution,
            ..
        }) = self.pending.take()
        else {
            return Err(EngineError::InvalidChoice);
        };
        self.phase = TurnPhase::AwaitingMove;
        self.apply_decoy(&mut resolution, royal, substitute);
        self.resolve_combat(resolution);
        Ok(())
    }

    /// Answers [`TurnPhase::AwaitingSkillChoice`] with one of the offered
    /// skills.
    pub fn resolve_skill_choice(&mut self, skill: SkillId) -> EngineResult<()> {
        self.ensure_phase(TurnPhase::AwaitingSkillChoice)?;
        let valid = matches!(
            &self.pending,
            Some(Pending::SkillChoice { choices, .. }) if choices.contains(&skill)
        );
        if !valid {
            return Err(EngineError::InvalidChoice);
        }
        let Some(Pending::SkillChoice { piece, .. }) = self.pending.take() else {
            return Err(EngineError::InvalidChoice);
        };
        self.phase = TurnPhase::AwaitingMove;
        self.learn_skill(piece, skill);
        // The piece stays at the queue front so further thresholds it
        // already cleared produce further level-ups.
        self.pump_level_ups();
        Ok(())
    }

    /// Picks and plays a move for the side to move using the configured
    /// difficulty, resolving any interrupts the move raises on its own
    /// (when that side is the computer). Returns the move played, or `None`
    /// when the side had no legal move and the turn passed.
    pub fn play_computer_turn(&mut self) -> EngineResult<Option<MoveCandidate>> {
        self.ensure_phase(TurnPhase::AwaitingMove)?;
        let side = self.side_to_move;
        let mv = search::select_move(
            &self.board,
            side,
            self.config.difficulty,
            self.last_move.as_ref(),
            self.restricted_piece,
            &mut self.rng,
        );
        match mv {
            Some(mv) => {
                debug!(from = %mv.from, to = %mv.to, "computer move");
                self.execute_move(mv.clone());
                Ok(Some(mv))
            }
            None => {
                self.log(
                    LogCategory::Normal,
                    Some(side),
                    "no legal moves, turn passes",
                );
                self.switch_turn();
                Ok(None)
            }
        }
    }

    fn ensure_phase(&self, expected: TurnPhase) -> EngineResult<()> {
        if self.result.is_some() {
            return Err(EngineError::GameOver);
        }
        if self.phase != expected {
            return Err(EngineError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    //  Move execution and combat resolution
    // ------------------------------------------------------------------

    fn execute_move(&mut self, mv: MoveCandidate) {
        let consumed_restriction = self.restricted_piece.is_some();
        // A fresh grant during this very resolution re-arms it.
        self.extra_turn_pending = false;

        let mover = self
            .board
            .get(mv.from)
            .cloned()
            .expect("validated before execution");
        let victims: VecDeque<Piece> = self.board.apply(&mv).into();
        self.last_move = Some(LastMove {
            mover: mover.kind,
            from: mv.from,
            to: mv.to,
        });

        debug!(piece = ?mover.kind, from = %mv.from, to = %mv.to, victims = victims.len(), "move executed");
        let category = if victims.is_empty() {
            LogCategory::Normal
        } else {
            LogCategory::Capture
        };
        self.push(GameEvent::Log(
            LogEntry::new(
                category,
                Some(mover.color),
                format!("{} {} to {}", mover.color, mover.kind.name(), mv.to),
            )
            .with_move(mv.from, mv.to),
        ));
        self.push(GameEvent::MoveExecuted {
            mv: mv.clone(),
            color: mover.color,
        });
        if !victims.is_empty() {
            self.push(GameEvent::PiecesCaptured {
                captor: mover.id,
                count: victims.len(),
            });
        }

        let landing = mv.to;
        let resolution = Resolution {
            captor: mover.id,
            captor_snapshot: mover.clone(),
            victims,
            xp_gained: 0,
            captured_any: false,
            consumed_restriction,
        };

        let needs_promotion = mover.kind == PieceType::Pawn
            && (landing.row == 0 || landing.row == 7 || mv.kind == MoveKind::FieldPromotion);
        if needs_promotion {
            if self.is_human(mover.color) {
                self.push(GameEvent::PromotionRequired {
                    color: mover.color,
                    at: landing,
                });
                self.pending = Some(Pending::Promotion {
                    at: landing,
                    resolution,
                });
                self.phase = TurnPhase::AwaitingPromotion;
                return;
            }
            self.promote_piece(landing, PieceType::Queen);
        }

        self.resolve_combat(resolution);
    }

    /// Changes the pawn's kind in place; identity, level, XP, and skills
    /// all carry over.
    fn promote_piece(&mut self, at: Square, kind: PieceType) {
        let Some(piece) = self.board.get_mut(at) else {
            return;
        };
        piece.kind = kind;
        piece.has_moved = true;
        let (id, color) = (piece.id, piece.color);
        self.push(GameEvent::Promoted { piece: id, kind });
        self.log(
            LogCategory::Skill,
            Some(color),
            format!("pawn promoted to {}", kind.name()),
        );
    }

    fn resolve_combat(&mut self, mut resolution: Resolution) {
        while let Some(victim) = resolution.victims.pop_front() {
            resolution.captured_any = true;
            resolution.xp_gained += capture_award(&resolution.captor_snapshot, &victim);

            if victim.has_skill(SkillId::Sacrifice) {
                if let Some(sq) = self.board.position_of(resolution.captor) {
                    self.board.take(sq);
                }
                self.push(GameEvent::SacrificeTriggered { victim: victim.id });
                self.log(
                    LogCategory::Skill,
                    Some(victim.color),
                    format!("{} drags its captor down with it", victim.kind.name()),
                );
            }

            if !victim.is_royal {
                continue;
            }

            // A fallen royal gets two escapes before the game ends.
            if victim.has_skill(SkillId::Decoy) {
                let candidates = self.decoy_candidates_for(victim.color);
                if !candidates.is_empty() {
                    if self.is_human(victim.color) {
                        self.push(GameEvent::DecoyChoiceRequired {
                            color: victim.color,
                            candidates: candidates.clone(),
                        });
                        self.log(
                            LogCategory::Skill,
                            Some(victim.color),
                            "decoy available, choose a substitute",
                        );
                        self.pending = Some(Pending::Decoy {
                            royal: victim,
                            candidates,
                            resolution,
                        });
                        self.phase = TurnPhase::AwaitingDecoy;
                        return;
                    }
                    let pick = *candidates
                        .choose(&mut self.rng)
                        .expect("candidates checked non-empty");
                    self.apply_decoy(&mut resolution, victim, pick);
                    continue;
                }
            }

            if let Some(heir) = self.succession_heir(victim.color) {
                let piece = self
                    .board
                    .get_mut(heir)
                    .expect("heir square just located");
                piece.is_royal = true;
                piece.forget(SkillId::Succession);
                let (id, color) = (piece.id, piece.color);
                self.push(GameEvent::SuccessionActivated { heir: id });
                self.log(
                    LogCategory::Skill,
                    Some(color),
                    "the queen inherits the crown",
                );
                continue;
            }

            let winner = resolution.captor_snapshot.color;
            info!(%winner, "royal piece captured");
            self.game_over(GameResult::win_for(winner));
            return;
        }

        // All victims handled; settle XP on the captor.
        resolution.xp_gained += MOVE_ACTION_XP;
        match self.board.position_of(resolution.captor) {
            Some(sq) => {
                let piece = self.board.get_mut(sq).expect("position just located");
                if resolution.captured_any {
                    piece.combo = ComboState::Pending;
                }
                piece.add_xp(resolution.xp_gained);
                self.levelup_queue.push_back(resolution.captor);
                self.after_levelups = AfterLevelUps::FinishAction {
                    consumed_restriction: resolution.consumed_restriction,
                };
                self.pump_level_ups();
            }
            None => {
                // The captor died to Sacrifice. No XP, no level-ups.
                if resolution.captor_snapshot.is_royal {
                    self.game_over(GameResult::win_for(
                        resolution.captor_snapshot.color.opposite(),
                    ));
                    return;
                }
                self.finish_action(resolution.consumed_restriction);
            }
        }
    }

    /// Squares of every non-royal ally that could take the royal's place.
    fn decoy_candidates_for(&self, color: PieceColor) -> Vec<Square> {
        self.board
            .iter()
            .filter(|(_, p)| p.color == color && !p.is_royal)
            .map(|(sq, _)| sq)
            .collect()
    }

    fn succession_heir(&self, color: PieceColor) -> Option<Square> {
        self.board
            .iter()
            .find(|(_, p)| {
                p.color == color
                    && p.kind == PieceType::Queen
                    && p.has_skill(SkillId::Succession)
            })
            .map(|(sq, _)| sq)
    }

    /// Swaps the fallen royal with the chosen ally: the royal reappears on
    /// the ally's square with Decoy spent, and the ally takes its place in
    /// the victim queue.
    fn apply_decoy(&mut self, resolution: &mut Resolution, mut royal: Piece, substitute: Square) {
        let ally = self
            .board
            .take(substitute)
            .expect("substitute square is occupied");
        royal.forget(SkillId::Decoy);
        let (id, color) = (royal.id, royal.color);
        self.board.set(substitute, royal);
        self.push(GameEvent::DecoyActivated {
            royal: id,
            at: substitute,
        });
        self.log(
            LogCategory::Skill,
            Some(color),
            format!("decoy: the {} takes the fall", ally.kind.name()),
        );
        resolution.victims.push_front(ally);
    }

    // ------------------------------------------------------------------
    //  Level-ups
    // ------------------------------------------------------------------

    /// Works through queued level-up checks, pausing on human skill picks.
    /// Once the queue drains, runs whatever was parked behind it.
    fn pump_level_ups(&mut self) {
        if self.result.is_some() {
            return;
        }
        loop {
            let Some(&id) = self.levelup_queue.front() else {
                break;
            };
            let Some(sq) = self.board.position_of(id) else {
                self.levelup_queue.pop_front();
                continue;
            };
            let piece = self.board.get_mut(sq).expect("position just located");
            let Some(level) = check_level_up(piece) else {
                self.levelup_queue.pop_front();
                continue;
            };
            let snapshot = piece.clone();
            self.push(GameEvent::PieceLeveledUp {
                piece: id,
                at: sq,
                level,
            });
            self.log(
                LogCategory::LevelUp,
                Some(snapshot.color),
                format!("{} at {} reached level {}", snapshot.kind.name(), sq, level),
            );
            let choices = self.registry.draw_choices(&mut self.rng, &snapshot, level);
            if choices.is_empty() {
                // Pool ran dry for this piece; the level still stands.
                continue;
            }
            if self.is_human(snapshot.color) {
                self.push(GameEvent::SkillChoicesOffered {
                    piece: id,
                    choices: choices.clone(),
                });
                self.pending = Some(Pending::SkillChoice {
                    piece: id,
                    choices,
                });
                self.phase = TurnPhase::AwaitingSkillChoice;
                return;
            }
            // Slots are drawn in random order, so the first is as good a
            // pick as any for the computer.
            self.learn_skill(id, choices[0]);
        }

        let after = std::mem::replace(&mut self.after_levelups, AfterLevelUps::Nothing);
        match after {
            AfterLevelUps::Nothing => {}
            AfterLevelUps::FinishAction {
                consumed_restriction,
            } => self.finish_action(consumed_restriction),
            AfterLevelUps::TurnStarted => self.after_turn_start(),
        }
    }

    fn learn_skill(&mut self, id: Uuid, skill: SkillId) {
        let Some(sq) = self.board.position_of(id) else {
            return;
        };
        let piece = self.board.get_mut(sq).expect("position just located");
        piece.learn(skill);
        let color = piece.color;
        self.push(GameEvent::SkillLearned { piece: id, skill });
        self.log(
            LogCategory::LevelUp,
            Some(color),
            format!("learned {}", skill.name()),
        );
        if skill == SkillId::TacticalBreakthrough {
            self.grant_extra_turn(id, color);
        }
    }

    /// Tactical Breakthrough: one bonus action, restricted to the piece
    /// that earned it.
    fn grant_extra_turn(&mut self, id: Uuid, color: PieceColor) {
        self.extra_turn_pending = true;
        self.actions_remaining += 1;
        self.restricted_piece = Some(id);
        self.push(GameEvent::ExtraTurn {
            color,
            actions_remaining: self.actions_remaining,
        });
        self.log(LogCategory::Skill, Some(color), "bonus action earned");
    }

    // ------------------------------------------------------------------
    //  Turn handoff
    // ------------------------------------------------------------------

    fn finish_action(&mut self, consumed_restriction: bool) {
        if self.result.is_some() {
            return;
        }
        self.actions_remaining = self.actions_remaining.saturating_sub(1);
        if consumed_restriction && !self.extra_turn_pending {
            self.restricted_piece = None;
        }
        if self.actions_remaining > 0 {
            self.resolve_extra_turn();
        } else {
            self.switch_turn();
        }
    }

    /// Keeps the turn with the current side for a bonus action, unless the
    /// restricted piece has no safe move, in which case the action lapses.
    fn resolve_extra_turn(&mut self) {
        if let Some(id) = self.restricted_piece {
            let safe_moves = self
                .board
                .position_of(id)
                .map(|sq| {
                    move_gen::legal_moves(&self.board, sq, self.last_move.as_ref())
                        .into_iter()
                        .filter(|mv| !attack::would_cause_check(&self.board, mv, self.side_to_move))
                        .count()
                })
                .unwrap_or(0);
            if safe_moves == 0 {
                self.push(GameEvent::ExtraTurnForfeited {
                    color: self.side_to_move,
                });
                self.log(
                    LogCategory::Warning,
                    Some(self.side_to_move),
                    "no safe moves for the bonus action",
                );
                self.actions_remaining = self.actions_remaining.saturating_sub(1);
                self.restricted_piece = None;
                self.extra_turn_pending = false;
                self.switch_turn();
                return;
            }
        }
        self.log(
            LogCategory::Skill,
            Some(self.side_to_move),
            format!("bonus action ({} remaining)", self.actions_remaining),
        );
        self.phase = TurnPhase::AwaitingMove;
    }

    fn switch_turn(&mut self) {
        if self.result.is_some() {
            return;
        }
        if self.side_to_move == PieceColor::Black {
            self.turn += 1;
            if self.turn > self.config.max_turns {
                self.sudden_death();
                return;
            }
        }
        self.side_to_move = self.side_to_move.opposite();
        self.actions_remaining = 1;
        self.push(GameEvent::TurnChanged {
            side_to_move: self.side_to_move,
            turn: self.turn,
        });
        self.start_of_turn();
    }

    /// Positional XP, passive skill XP, and combo decay for every piece of
    /// the side coming on move, followed by any level-ups they trigger.
    fn start_of_turn(&mut self) {
        let side = self.side_to_move;
        let own: Vec<(Square, Uuid)> = self
            .board
            .iter()
            .filter(|(_, p)| p.color == side)
            .map(|(sq, p)| (sq, p.id))
            .collect();

        for (sq, id) in own {
            let Some(piece) = self.board.get_mut(sq) else {
                continue;
            };
            let mut gained = false;
            let positional = rank_xp(side, sq.row);
            if positional > 0 {
                piece.add_xp(positional);
                gained = true;
            }
            if piece.has_skill(SkillId::FastLearner) {
                let award = fast_learner_xp(piece);
                piece.add_xp(award);
                gained = true;
            }
            if piece.has_skill(SkillId::SurvivalInstinct) && piece.in_enemy_territory(sq.row) {
                let award = survival_instinct_xp(piece);
                piece.add_xp(award);
                gained = true;
            }
            piece.combo = match piece.combo {
                ComboState::Pending => ComboState::Active,
                ComboState::Active | ComboState::None => ComboState::None,
            };
            if gained {
                self.levelup_queue.push_back(id);
            }
        }

        self.after_levelups = AfterLevelUps::TurnStarted;
        self.pump_level_ups();
    }

    fn after_turn_start(&mut self) {
        let side = self.side_to_move;
        if let Some((sq, _)) = self.board.find_royal(side) {
            if attack::is_square_attacked(&self.board, sq, side.opposite()) {
                self.push(GameEvent::CheckNotice {
                    color: side,
                    royal_at: sq,
                });
                self.log(LogCategory::Warning, Some(side), "check!");
            }
        }
        self.phase = TurnPhase::AwaitingMove;
    }

    /// Past the turn limit the game is decided on material, counted with
    /// the same level- and skill-aware values the search uses.
    fn sudden_death(&mut self) {
        let white = evaluate::material_score(&self.board, PieceColor::White);
        let black = evaluate::material_score(&self.board, PieceColor::Black);
        let result = if white > black {
            GameResult::WhiteWins
        } else if black > white {
            GameResult::BlackWins
        } else {
            GameResult::Draw
        };
        self.log(
            LogCategory::Normal,
            None,
            format!("turn limit reached, material {white:.0} vs {black:.0}"),
        );
        self.game_over(result);
    }

    fn game_over(&mut self, result: GameResult) {
        info!(?result, "game over");
        self.result = Some(result);
        self.phase = TurnPhase::GameOver;
        self.pending = None;
        self.levelup_queue.clear();
        self.after_levelups = AfterLevelUps::Nothing;
        self.push(GameEvent::GameEnded { result });
        let message = match result.winner() {
            Some(color) => format!("{color} wins"),
            None => "draw".to_string(),
        };
        self.log(LogCategory::LevelUp, result.winner(), message);
    }

    // ------------------------------------------------------------------
    //  Event plumbing
    // ------------------------------------------------------------------

    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn log(
        &mut self,
        category: LogCategory,
        color: Option<PieceColor>,
        message: impl Into<String>,
    ) {
        self.events.push(GameEvent::log(category, color, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(GameConfig {
            seed: Some(42),
            ..GameConfig::default()
        })
    }

    fn mv(session: &GameSession, from: Square, to: Square) -> MoveCandidate {
        session
            .available_moves(from)
            .into_iter()
            .find(|m| m.to == to)
            .expect("move available")
    }

    #[test]
    fn test_opening_move_switches_turn() {
        let mut s = session();
        let pawn = mv(&s, Square::new(6, 4), Square::new(4, 4));
        assert_eq!(s.attempt_move(&pawn).unwrap(), AttemptOutcome::Applied);
        assert_eq!(s.side_to_move(), PieceColor::Black);
        assert_eq!(s.turn(), 1);
        // Mover earned the flat action XP.
        assert_eq!(s.board().get(Square::new(4, 4)).unwrap().xp, 10);
    }

    #[test]
    fn test_turn_counter_increments_after_black() {
        let mut s = session();
        let white = mv(&s, Square::new(6, 0), Square::new(5, 0));
        s.attempt_move(&white).unwrap();
        let black = mv(&s, Square::new(1, 0), Square::new(2, 0));
        s.attempt_move(&black).unwrap();
        assert_eq!(s.turn(), 2);
        assert_eq!(s.side_to_move(), PieceColor::White);
    }

    #[test]
    fn test_wrong_side_rejected() {
        let mut s = session();
        let black_pawn = MoveCandidate::new(
            Square::new(1, 0),
            Square::new(2, 0),
            MoveKind::Normal,
        );
        assert_eq!(
            s.attempt_move(&black_pawn).unwrap(),
            AttemptOutcome::Rejected
        );
    }

    #[test]
    fn test_illegal_destination_rejected() {
        let mut s = session();
        let bad = MoveCandidate::new(Square::new(6, 0), Square::new(3, 0), MoveKind::Normal);
        assert_eq!(s.attempt_move(&bad).unwrap(), AttemptOutcome::Rejected);
    }

    #[test]
    fn test_empty_square_is_an_error() {
        let mut s = session();
        let ghost = MoveCandidate::new(Square::new(4, 4), Square::new(3, 4), MoveKind::Normal);
        assert!(matches!(
            s.attempt_move(&ghost),
            Err(EngineError::NoPieceAt { .. })
        ));
    }

    #[test]
    fn test_events_are_drained_once() {
        let mut s = session();
        let pawn = mv(&s, Square::new(6, 4), Square::new(5, 4));
        s.attempt_move(&pawn).unwrap();
        let events = s.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::MoveExecuted { .. })));
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_move_log_carries_endpoints() {
        let mut s = session();
        let (from, to) = (Square::new(6, 4), Square::new(4, 4));
        let pawn = mv(&s, from, to);
        s.attempt_move(&pawn).unwrap();
        let events = s.take_events();
        let entry = events
            .iter()
            .find_map(|e| match e {
                GameEvent::Log(entry) if entry.from_to.is_some() => Some(entry),
                _ => None,
            })
            .expect("move log line");
        assert_eq!(entry.from_to, Some((from, to)));
        assert_eq!(entry.category, LogCategory::Normal);
    }

    #[test]
    fn test_resolve_without_interrupt_is_wrong_phase() {
        let mut s = session();
        assert!(matches!(
            s.resolve_promotion(PieceType::Queen),
            Err(EngineError::WrongPhase { .. })
        ));
        assert!(matches!(
            s.resolve_skill_choice(SkillId::Sprinter),
            Err(EngineError::InvalidChoice) | Err(EngineError::WrongPhase { .. })
        ));
    }
}
