//! Goban-Core: an incremental Go board with full undo.
//!
//! This crate provides the board layer of a Go engine: stone placement,
//! captures, liberty tracking, ko and superko detection, and cheap undo and
//! snapshot/restore for tree search. It does no scoring, searching or file
//! parsing.
//!
//! ## Modules
//!
//! - [`constants`] - Board extent, point layout and history capacity
//! - [`point`] - Points, colors and coordinate strings
//! - [`geometry`] - Per-size neighbor, line and area tables
//! - [`zobrist`] - Position hash keys
//! - [`rules`] - Suicide and ko rule settings
//! - [`setup`] - Initial stone placement
//! - [`board`] - The board state and its queries
//! - [`block`] - Blocks of connected stones and their maintenance
//! - [`play`] - Move execution and undo
//! - [`history`] - Move records and move flags
//! - [`repetition`] - Ko and superko detection
//! - [`snapshot`] - Snapshot and restore
//! - [`consistency`] - Recomputation of the incremental state for testing
//! - [`selfplay`] - Random games for stress testing
//!
//! ## Example
//!
//! ```
//! use goban_core::{Board, Color, Rules, Setup, parse_coord};
//!
//! let mut board = Board::new(9, Rules::default(), Setup::new()).unwrap();
//! let d4 = parse_coord("D4", 9).unwrap();
//! board.play(d4, Color::Black).unwrap();
//!
//! // Moves are always applied; check legality and undo if needed
//! let e4 = parse_coord("E4", 9).unwrap();
//! board.play(e4, Color::White).unwrap();
//! if !board.is_legal() {
//!     board.undo().unwrap();
//! }
//! assert_eq!(board.num_liberties(d4), 3);
//! ```

pub mod block;
pub mod board;
pub mod consistency;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod history;
pub mod play;
pub mod point;
pub mod repetition;
pub mod rules;
pub mod selfplay;
pub mod setup;
pub mod snapshot;
pub mod zobrist;

pub use board::Board;
pub use constants::{NULL_MOVE, PASS, RESIGN};
pub use error::{BoardError, ConsistencyError};
pub use geometry::Geometry;
pub use history::{MoveInfo, PlayerMove};
pub use point::{BoardColor, Color, Point, parse_coord, pt, str_coord};
pub use rules::{KoRule, Rules};
pub use setup::Setup;
pub use zobrist::HashCode;
