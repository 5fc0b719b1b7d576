//! Error types for board construction and move execution.
//!
//! Only programming errors and resource limits are reported here. Rule
//! violations (suicide, ko, superko) are not errors: the move is applied and
//! flagged in [`MoveInfo`](crate::history::MoveInfo), and the caller decides
//! whether to take it back.

use thiserror::Error;

use crate::point::{Point, str_coord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("unsupported board size {0}")]
    InvalidSize(usize),

    #[error("point {} is not on the board", str_coord(*.0))]
    InvalidPoint(Point),

    #[error("point {} is not empty", str_coord(*.0))]
    Occupied(Point),

    #[error("move history is full")]
    HistoryFull,

    #[error("no move to undo")]
    EmptyHistory,

    #[error("no snapshot to restore")]
    NoSnapshot,

    #[error("invalid setup: {0}")]
    InvalidSetup(String),

    #[error("cannot parse coordinate {0:?}")]
    ParseCoord(String),

    #[error("unknown rules {0:?}")]
    UnknownRules(String),

    #[error("bad board diagram: {0}")]
    ParseDiagram(String),
}

/// Mismatch between the incremental board state and a recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("inconsistent board at {}: {detail}", str_coord(*point))]
pub struct ConsistencyError {
    pub point: Point,
    pub detail: String,
}

impl ConsistencyError {
    pub(crate) fn new(point: Point, detail: impl Into<String>) -> Self {
        Self {
            point,
            detail: detail.into(),
        }
    }
}
