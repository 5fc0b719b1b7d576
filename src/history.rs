//! Move history records.
//!
//! Every played move, pass included, pushes one [`StackEntry`] holding
//! exactly what undo needs: the state values the move overwrote and how the
//! block structure changed. Undo never recomputes anything from scratch.

use smallvec::SmallVec;

use crate::block::BlockId;
use crate::point::{Color, Point};
use crate::zobrist::HashCode;

/// Flags describing the most recent move.
///
/// They are reset at the start of every [`play`](crate::Board::play) and
/// only describe that move; undo does not restore the previous move's flags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveInfo {
    /// The move recreated an earlier position.
    pub repetition: bool,
    /// The move left its own block without liberties and the block was
    /// removed.
    pub suicide: bool,
    /// The move captured at least one opponent block.
    pub capturing: bool,
    /// The move is illegal under the active rules. It was applied anyway.
    pub illegal: bool,
}

/// A move as recorded in the history.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayerMove {
    pub color: Color,
    pub point: Point,
}

#[derive(Clone, Debug)]
pub(crate) struct StackEntry {
    pub color: Color,
    pub point: Point,

    // Overwritten state
    pub is_first: bool,
    pub is_new_position: bool,
    pub to_play: Color,
    pub hash: HashCode,
    pub ko_point: Option<Point>,

    // Block changes. `stone_added_to` is set when the stone extended one
    // existing block; otherwise the move created a new block on top of the
    // arena, merging `merged` if non-empty.
    pub stone_added_to: Option<BlockId>,
    pub old_anchor: Point,
    pub new_libs: SmallVec<[Point; 4]>,
    pub merged: SmallVec<[BlockId; 4]>,
    pub killed: SmallVec<[BlockId; 4]>,
    pub suicide: Option<BlockId>,
}

impl StackEntry {
    pub(crate) fn new(point: Point, color: Color) -> Self {
        Self {
            color,
            point,
            is_first: false,
            is_new_position: false,
            to_play: color,
            hash: 0,
            ko_point: None,
            stone_added_to: None,
            old_anchor: point,
            new_libs: SmallVec::new(),
            merged: SmallVec::new(),
            killed: SmallVec::new(),
            suicide: None,
        }
    }

    #[inline]
    pub(crate) fn as_move(&self) -> PlayerMove {
        PlayerMove {
            color: self.color,
            point: self.point,
        }
    }
}
