//! Computer opponent.
//!
//! Three strengths share one simulation primitive: [`simulate`] plays a
//! move on a cloned board with the same XP arithmetic as live play, then
//! advances levels silently and auto-promotes pawns to queens. Skills are
//! never rolled during search, so the whole lookahead is deterministic for
//! a given position.

pub mod evaluate;
pub mod minimax;
pub mod ordering;
pub mod quiescence;

use crate::board::Board;
use crate::constants::{GREEDY_AGGRESSION_BONUS, HARD_SEARCH_DEPTH, MOVE_ACTION_XP};
use crate::move_gen;
use crate::progression::{advance_levels_silently, capture_award};
use crate::types::{LastMove, MoveCandidate, MoveKind, PieceColor, PieceType};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Computer opponent strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random legal move.
    Easy,
    /// One-ply greedy evaluation with a small capture preference.
    #[default]
    Normal,
    /// Minimax with alpha-beta pruning and quiescence.
    Hard,
}

/// Plays `mv` on `board` with the live XP arithmetic, then levels silently
/// and auto-promotes. The evaluation's growth term turns the silent levels
/// into score.
pub(crate) fn simulate(board: &mut Board, mv: &MoveCandidate) {
    let Some(captor) = board.get(mv.from).cloned() else {
        return;
    };
    let victims = board.apply(mv);

    let landing = if mv.kind == MoveKind::FieldPromotion {
        mv.from
    } else {
        mv.to
    };
    let mut xp = MOVE_ACTION_XP;
    for victim in &victims {
        xp += capture_award(&captor, victim);
    }

    if let Some(piece) = board.get_mut(landing) {
        if piece.id == captor.id {
            piece.add_xp(xp);
            advance_levels_silently(piece);
            let promotes = piece.kind == PieceType::Pawn
                && (landing.row == 0 || landing.row == 7 || mv.kind == MoveKind::FieldPromotion);
            if promotes {
                piece.kind = PieceType::Queen;
            }
        }
    }
}

/// Root move list for one side, optionally restricted to a single piece
/// (bonus actions only permit the piece that earned them).
fn root_moves(
    board: &Board,
    color: PieceColor,
    last_move: Option<&LastMove>,
    restrict_to: Option<Uuid>,
) -> Vec<MoveCandidate> {
    match restrict_to.and_then(|id| board.position_of(id)) {
        Some(sq) => move_gen::legal_moves(board, sq, last_move),
        None => move_gen::all_legal_moves(board, color, last_move),
    }
}

fn greedy_move<R: Rng>(
    board: &Board,
    color: PieceColor,
    mut moves: Vec<MoveCandidate>,
    rng: &mut R,
) -> Option<MoveCandidate> {
    // Shuffle first so equally scored moves vary between games.
    moves.shuffle(rng);
    let mut best: Option<MoveCandidate> = None;
    let mut best_score = f32::NEG_INFINITY;
    for mv in moves {
        let mut clone = board.clone();
        simulate(&mut clone, &mv);
        let mut score = evaluate::evaluate(&clone, color);
        if board.get(mv.to).is_some() {
            score += GREEDY_AGGRESSION_BONUS;
        }
        if score > best_score {
            best_score = score;
            best = Some(mv);
        }
    }
    best
}

/// Picks the computer's move, or `None` when the side has no legal move.
pub fn select_move<R: Rng>(
    board: &Board,
    color: PieceColor,
    difficulty: Difficulty,
    last_move: Option<&LastMove>,
    restrict_to: Option<Uuid>,
    rng: &mut R,
) -> Option<MoveCandidate> {
    let moves = root_moves(board, color, last_move, restrict_to);
    if moves.is_empty() {
        return None;
    }
    let candidates = moves.len();
    let chosen = match difficulty {
        Difficulty::Easy => moves.choose(rng).cloned(),
        Difficulty::Normal => greedy_move(board, color, moves, rng),
        Difficulty::Hard => minimax::best_move(board, color, moves, HARD_SEARCH_DEPTH),
    };
    if let Some(mv) = &chosen {
        tracing::debug!(%color, ?difficulty, candidates, from = %mv.from, to = %mv.to, "move selected");
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use crate::types::Square;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_simulate_awards_xp_and_levels() {
        let mut board = Board::empty();
        let mut knight = Piece::new(PieceType::Knight, PieceColor::White);
        knight.xp = 40;
        board.set(Square::new(4, 4), knight);
        board.set(Square::new(2, 5), Piece::new(PieceType::Pawn, PieceColor::Black));
        let mv = MoveCandidate::new(Square::new(4, 4), Square::new(2, 5), MoveKind::Capture);
        simulate(&mut board, &mv);
        let knight = board.get(Square::new(2, 5)).unwrap();
        // 40 + 30 capture + 10 move = 80, past the level-2 threshold.
        assert_eq!(knight.xp, 80);
        assert_eq!(knight.level, 2);
        assert!(knight.skills.is_empty());
    }

    #[test]
    fn test_simulate_auto_promotes_on_last_rank() {
        let mut board = Board::empty();
        board.set(Square::new(1, 0), Piece::new(PieceType::Pawn, PieceColor::White));
        let mv = MoveCandidate::new(Square::new(1, 0), Square::new(0, 0), MoveKind::Normal);
        simulate(&mut board, &mv);
        assert_eq!(board.get(Square::new(0, 0)).unwrap().kind, PieceType::Queen);
    }

    #[test]
    fn test_easy_picks_some_legal_move() {
        let board = Board::standard();
        let mut rng = StdRng::seed_from_u64(4);
        let mv = select_move(&board, PieceColor::White, Difficulty::Easy, None, None, &mut rng)
            .expect("opening move");
        assert!(board.get(mv.from).is_some());
    }

    #[test]
    fn test_normal_takes_hanging_queen() {
        let mut board = Board::empty();
        board.set(Square::new(7, 4), Piece::new(PieceType::King, PieceColor::White));
        board.set(Square::new(0, 4), Piece::new(PieceType::King, PieceColor::Black));
        board.set(Square::new(4, 0), Piece::new(PieceType::Rook, PieceColor::Black));
        board.set(Square::new(4, 6), Piece::new(PieceType::Queen, PieceColor::White));
        let mut rng = StdRng::seed_from_u64(9);
        let mv = select_move(
            &board,
            PieceColor::Black,
            Difficulty::Normal,
            None,
            None,
            &mut rng,
        )
        .unwrap();
        assert_eq!(mv.to, Square::new(4, 6));
    }

    #[test]
    fn test_restriction_limits_root_moves() {
        let board = Board::standard();
        let knight_sq = Square::new(7, 1);
        let knight_id = board.get(knight_sq).unwrap().id;
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..10 {
            let mv = select_move(
                &board,
                PieceColor::White,
                Difficulty::Easy,
                None,
                Some(knight_id),
                &mut rng,
            )
            .unwrap();
            assert_eq!(mv.from, knight_sq);
        }
    }
}
