//! Ray movement for rooks, bishops, and queens, plus the ray-based skills.
//!
//! One walk per direction handles the whole skill matrix:
//!
//! - Acrobatics keeps walking past any occupied square.
//! - Piercing offers a two-for-one capture when a second enemy stands
//!   directly behind the first along the ray.
//! - Tyrant's March suppresses plain ray captures entirely: enemies on the
//!   ray are recorded as crush victims and the piece may only land on an
//!   empty square beyond them.
//! - Cross Switch turns the first friendly blocker into a swap target; the
//!   ally is pushed one step back along the ray.

use crate::board::Board;
use crate::piece::Piece;
use crate::skills::SkillId;
use crate::types::{MoveCandidate, MoveKind, Square};

/// Walks each ray direction and collects every candidate the piece's skill
/// set allows.
pub fn ray_moves(
    board: &Board,
    from: Square,
    piece: &Piece,
    directions: &[(i8, i8)],
) -> Vec<MoveCandidate> {
    let mut moves = Vec::new();
    let acrobatics = piece.has_skill(SkillId::Acrobatics);
    let piercing = piece.has_skill(SkillId::Piercing);
    let tyrant = piece.has_skill(SkillId::TyrantsMarch);
    let cross_switch = piece.has_skill(SkillId::CrossSwitch);

    for &(dr, dc) in directions {
        let mut crushed: Vec<Square> = Vec::new();
        let mut cursor = from.offset(dr, dc);

        while let Some(sq) = cursor {
            match board.get(sq) {
                None => {
                    if tyrant && !crushed.is_empty() {
                        moves.push(MoveCandidate::new(
                            from,
                            sq,
                            MoveKind::TyrantMarch {
                                crushed: crushed.clone(),
                            },
                        ));
                    } else {
                        moves.push(MoveCandidate::new(from, sq, MoveKind::Normal));
                    }
                }
                Some(target) if target.color != piece.color => {
                    if tyrant {
                        // Crush victim; the landing square comes later.
                        crushed.push(sq);
                    } else {
                        moves.push(MoveCandidate::new(from, sq, MoveKind::Capture));
                        if piercing {
                            if let Some(behind) = sq.offset(dr, dc) {
                                if board
                                    .get(behind)
                                    .is_some_and(|p| p.color != piece.color)
                                {
                                    moves.push(MoveCandidate::new(
                                        from,
                                        behind,
                                        MoveKind::PierceCapture { first: sq },
                                    ));
                                }
                            }
                        }
                        if !acrobatics {
                            break;
                        }
                    }
                }
                Some(_ally) => {
                    if cross_switch {
                        // Push the ally one step back along the ray. The
                        // step-back square is the one just visited, so it is
                        // always on the board and empty or the origin.
                        let push_back = sq
                            .offset(-dr, -dc)
                            .unwrap_or(from);
                        moves.push(MoveCandidate::new(
                            from,
                            sq,
                            MoveKind::CrossSwitch { push_back },
                        ));
                        break;
                    } else if !acrobatics {
                        break;
                    }
                }
            }
            cursor = sq.offset(dr, dc);
        }
    }
    moves
}
