//! Engine constants: piece values, XP tables, tier probabilities, and
//! board geometry.
//!
//! Everything tunable lives here so the evaluation function, the progression
//! system, and the resolution state machine stay in sync. The capture-XP and
//! tier tables are shared by the live game and the AI's deterministic
//! simulation; diverging them would make the search misjudge level-up timing.

/// Board edge length; the grid is always 8x8.
pub const BOARD_SIZE: u8 = 8;

/// Highest level a piece can reach.
pub const MAX_LEVEL: u8 = 5;

/// Cumulative XP required to reach levels 1 through 5.
///
/// A piece at level `L` levels up when its XP clears `XP_THRESHOLDS[L]`
/// (so the final entry is the threshold for entering level 5).
pub const XP_THRESHOLDS: [u32; 5] = [0, 50, 200, 450, 800];

/// Flat XP earned for executing any move.
pub const MOVE_ACTION_XP: u32 = 10;

/// Fraction of a captured piece's accumulated XP stolen by its captor.
pub const XP_STEAL_RATE: f32 = 0.3;

/// Capture XP by victim type.
pub const PAWN_CAPTURE_XP: u32 = 30;
pub const KNIGHT_CAPTURE_XP: u32 = 90;
pub const BISHOP_CAPTURE_XP: u32 = 90;
pub const ROOK_CAPTURE_XP: u32 = 150;
pub const QUEEN_CAPTURE_XP: u32 = 300;
pub const DEFAULT_CAPTURE_XP: u32 = 50;

/// Bounty Hunter capture-XP multiplier (applied with floor).
pub const BOUNTY_HUNTER_FACTOR: f32 = 1.5;

/// Fast Learner start-of-turn gain: `floor(xp * RATE) + FLAT`.
pub const FAST_LEARNER_RATE: f32 = 0.03;
pub const FAST_LEARNER_FLAT: u32 = 5;

/// Survival Instinct start-of-turn gain while in enemy territory.
pub const SURVIVAL_INSTINCT_RATE: f32 = 0.06;
pub const SURVIVAL_INSTINCT_FLAT: u32 = 10;

/// Positional XP awarded at the start of each turn, keyed by the piece's
/// rank as seen from its own side (rank 8 is the enemy baseline). Checked
/// top-down; the first matching entry wins.
pub const RANK_XP: [(u8, u32); 3] = [(7, 20), (5, 10), (3, 5)];

/// Number of skill candidates offered per level-up.
pub const SKILL_DRAW_SLOTS: usize = 3;

/// Tier sampling table: row `L - 2` holds the percent weights for tiers
/// 1 through 4 when a piece reaches level `L` (levels 2 through 5).
pub const TIER_PROBABILITIES: [[u8; 4]; 4] = [
    [70, 25, 5, 0],
    [40, 45, 14, 1],
    [15, 35, 40, 10],
    [0, 20, 50, 30],
];

/// Per-tier skill value estimates used by the growth-potential evaluation
/// term (index 0 is unused padding so tiers index directly).
pub const TIER_VALUES: [f32; 5] = [0.0, 50.0, 150.0, 400.0, 1000.0];

/// Base material values by piece type.
pub const PAWN_VALUE: f32 = 100.0;
pub const KNIGHT_VALUE: f32 = 320.0;
pub const BISHOP_VALUE: f32 = 330.0;
pub const ROOK_VALUE: f32 = 500.0;
pub const QUEEN_VALUE: f32 = 900.0;
pub const KING_VALUE: f32 = 20000.0;

/// Material scaling per level above 1.
pub const LEVEL_VALUE_SCALE: f32 = 0.1;

/// Flat material bonus per tier of each owned skill.
pub const SKILL_TIER_VALUE: f32 = 25.0;

/// Positional evaluation bonuses.
pub const CENTER_CORE_BONUS: f32 = 20.0;
pub const CENTER_RING_BONUS: f32 = 10.0;
pub const PAWN_ADVANCE_BONUS: f32 = 5.0;

/// Skill-synergy evaluation bonuses.
pub const SURVIVAL_SYNERGY_BONUS: f32 = 40.0;
pub const KINGS_CHARGE_SYNERGY_BONUS: f32 = 50.0;

/// Move-ordering heuristics.
pub const CAPTURE_ORDER_FACTOR: f32 = 10.0;
pub const TYRANT_ORDER_BONUS: f32 = 500.0;
pub const LEVELUP_ORDER_BONUS: f32 = 200.0;
pub const LEVELUP_ORDER_MARGIN: u32 = 50;

/// Greedy-tier capture preference.
pub const GREEDY_AGGRESSION_BONUS: f32 = 5.0;

/// Fixed minimax depth for the hard difficulty.
pub const HARD_SEARCH_DEPTH: u32 = 3;

/// Default turn limit before sudden-death material scoring.
pub const DEFAULT_MAX_TURNS: u32 = 60;

// Direction vectors as (row delta, col delta). Row 0 is Black's home rank,
// so White advances with negative row deltas.

pub const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Extra offsets granted to knights by the Wide Jump skill.
pub const WIDE_JUMP_OFFSETS: [(i8, i8); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// The 2-ring granted to kings by King's Charge: all squares at Chebyshev
/// distance 2 except the knight-shaped ones are straight or diagonal; the
/// full ring is used, matching the expanded "charge" footprint.
pub const KINGS_CHARGE_OFFSETS: [(i8, i8); 16] = [
    (-2, -2),
    (-2, -1),
    (-2, 0),
    (-2, 1),
    (-2, 2),
    (-1, -2),
    (-1, 2),
    (0, -2),
    (0, 2),
    (1, -2),
    (1, 2),
    (2, -2),
    (2, -1),
    (2, 0),
    (2, 1),
    (2, 2),
];
