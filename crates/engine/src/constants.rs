//! Engine constants: piece codes, direction tables, evaluation weights
//!
//! ## Board layout
//!
//! The board is a 120-cell mailbox: 10 columns by 12 rows, with the playable
//! 8x8 area surrounded by a border of `OUT` sentinel cells (two full rows top
//! and bottom, one column left and right). A sliding-piece ray scan simply
//! walks a fixed delta until it hits a piece or the sentinel, so the inner
//! loops need no bounds checks at all.
//!
//! Cell index = row * 10 + column; the playable square with file `f` (0 = a)
//! and rank `r` (0 = rank 1) lives at `(r + 2) * 10 + f + 1`.
//!
//! ## Piece encoding
//!
//! Cells hold signed 8-bit codes: positive for white, negative for black,
//! zero for empty. The absolute value is the piece type, so `piece.abs()`
//! indexes the weight tables and `piece.signum()` is the owning color.
//!
//! ## Score bands
//!
//! Search values are integers. Forced mates live near `MATE_SCORE`, offset by
//! the depth at which they occur so that a mate closer to the root always
//! compares strictly better for the winning side. `SCORE_INF` bounds the
//! alpha-beta window and doubles as the "worst possible" value assigned to a
//! root successor that exposes its own king.

/// Side color: `WHITE` = 1, `BLACK` = -1. Matches the sign of piece codes.
pub type Color = i8;

pub const WHITE: Color = 1;
pub const BLACK: Color = -1;

// Piece type codes (absolute values of cell contents).
pub const EMPTY: i8 = 0;
pub const PAWN: i8 = 1;
pub const KNIGHT: i8 = 2;
pub const BISHOP: i8 = 3;
pub const ROOK: i8 = 4;
pub const QUEEN: i8 = 5;
pub const KING: i8 = 6;
/// Sentinel stored in border cells; never matches a piece or empty.
pub const OUT: i8 = 7;

pub const BOARD_CELLS: usize = 120;

// Mailbox direction deltas.
pub const NORTH: i8 = 10;
pub const SOUTH: i8 = -10;
pub const EAST: i8 = 1;
pub const WEST: i8 = -1;

pub const ROOK_DIRS: [i8; 4] = [NORTH, SOUTH, EAST, WEST];
pub const BISHOP_DIRS: [i8; 4] = [11, 9, -9, -11];
/// King and queen share all eight directions.
pub const ROYAL_DIRS: [i8; 8] = [NORTH, SOUTH, EAST, WEST, 11, 9, -9, -11];
pub const KNIGHT_JUMPS: [i8; 8] = [21, 19, 12, 8, -8, -12, -19, -21];

// Home cells used by castling bookkeeping (mailbox indices).
pub const A1: usize = 21;
pub const E1: usize = 25;
pub const H1: usize = 28;
pub const A8: usize = 91;
pub const E8: usize = 95;
pub const H8: usize = 98;

// Evaluation weights, in pawn units. Scaled by EVAL_SCALE and truncated to
// an integer at the end of evaluation so the search stays integer-only.
pub const PIECE_WEIGHT: [f64; 7] = [0.0, 1.0, 3.0, 3.0, 4.5, 9.0, 0.0];
/// A piece under attack contributes only this fraction of its weight.
pub const THREAT_FACTOR: f64 = 2.0 / 3.0;
/// A threatened king costs its side a flat (smaller) penalty instead.
pub const KING_THREAT_PENALTY: f64 = 0.3;
pub const CENTER_BONUS: f64 = 0.15;
pub const BISHOP_PAIR_BONUS: f64 = 0.25;
pub const KNIGHT_EDGE_PENALTY: f64 = 0.12;
/// Per empty square reachable by a bishop/rook/queen.
pub const MOBILITY_BONUS: f64 = 0.015;
/// Mobility only counts once development is plausibly under way.
pub const MOBILITY_MIN_PLY: u32 = 8;
pub const DOUBLED_PAWN_PENALTY: f64 = 0.15;
pub const ISOLATED_PAWN_PENALTY: f64 = 0.2;
/// Most-advanced pawn of its file with no supporting neighbor pawn.
pub const UNSUPPORTED_ADVANCE_PENALTY: f64 = 0.12;
/// Per retained castling right, while the opponent queen is on the board.
pub const CASTLING_RIGHT_BONUS: f64 = 0.25;
pub const EVAL_SCALE: f64 = 1000.0;

/// The four central cells d4, e4, d5, e5 (mailbox indices).
pub const CENTER_CELLS: [usize; 4] = [54, 55, 64, 65];

// Search score bands.
pub const MATE_SCORE: i64 = 1_000_000;
pub const SCORE_INF: i64 = 2_000_000;
pub const DRAW_SCORE: i64 = 0;
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// True when a value encodes a forced mate for either side.
pub fn is_mate_score(value: i64) -> bool {
    value.abs() > MATE_SCORE - MAX_SEARCH_DEPTH as i64
}
