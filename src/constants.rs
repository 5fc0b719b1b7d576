//! Constants for board extent, point layout, and history capacity.
//!
//! Points are indices into a fixed-size array that is large enough for the
//! biggest supported board plus a ring of border points. The same layout is
//! used for every board size, so a point index means the same intersection
//! on a 9x9 and on a 19x19 board, and neighbor arithmetic never needs a
//! bounds check.
//!
//! ```text
//! row 0            border
//! row 1..=size     [border] col 1..=size [border ...]
//! row size+1       border
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest supported board size.
pub const MIN_SIZE: usize = 2;

/// Largest supported board size.
pub const MAX_SIZE: usize = 19;

/// Offset between horizontally adjacent points.
pub const WE: usize = 1;

/// Offset between vertically adjacent points (one row).
pub const NS: usize = MAX_SIZE + 1;

/// Number of entries in a per-point array, including the border ring.
pub const MAX_POINT: usize = MAX_SIZE * MAX_SIZE + 3 * (MAX_SIZE + 1);

// =============================================================================
// Special Move Values
// =============================================================================

/// Pass move marker (index 0 is border, so it never names a playable point).
pub const PASS: usize = 0;

/// Resign move marker.
pub const RESIGN: usize = usize::MAX;

/// "No move" marker, e.g. the last move of a fresh board.
pub const NULL_MOVE: usize = usize::MAX - 1;

// =============================================================================
// History
// =============================================================================

/// Capacity of the move history (three times the largest board area).
pub const MAX_NUM_MOVES: usize = 3 * MAX_SIZE * MAX_SIZE;

/// Distance from `MAX_NUM_MOVES` at which the board reports that the
/// history is about to overflow.
pub const HISTORY_RESERVE: usize = 50;

/// Seed for the Zobrist key generator. Fixed so hashes are reproducible.
pub const ZOBRIST_SEED: u64 = 0x9e37_79b9_7f4a_7c15;
