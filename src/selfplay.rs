//! Random self-play games.
//!
//! Plays uniformly random legal moves, never filling a player's own
//! single-point eyes, until both sides pass or the history is about to run
//! out. Used to exercise the board in stress tests and from the command
//! line; a move flagged illegal is undone and another candidate tried, so
//! every random game also exercises the play-check-undo cycle.

use crate::board::Board;
use crate::constants::PASS;
use crate::error::ConsistencyError;
use crate::point::{BoardColor, Color, Point};

/// Counters collected over one or more games.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStats {
    pub games: usize,
    pub moves: usize,
    pub passes: usize,
    /// Stones captured by black and white.
    pub captures: [usize; 2],
    /// Moves that were played, found illegal and taken back.
    pub rejected: usize,
    pub suicides: usize,
    pub repetitions: usize,
}

impl GameStats {
    pub fn merge(&mut self, other: &GameStats) {
        self.games += other.games;
        self.moves += other.moves;
        self.passes += other.passes;
        self.captures[0] += other.captures[0];
        self.captures[1] += other.captures[1];
        self.rejected += other.rejected;
        self.suicides += other.suicides;
        self.repetitions += other.repetitions;
    }
}

/// True if `p` is an empty point whose neighbors all belong to `c` and that
/// the opponent cannot make false through the diagonals.
pub fn is_eye(board: &Board, p: Point, c: Color) -> bool {
    if !board.is_empty(p) {
        return false;
    }
    if board.geometry().neighbors(p).iter().any(|&nb| !board.is_color(nb, c)) {
        return false;
    }
    let at_edge = board.num_diagonals(p, BoardColor::Border) > 0;
    let false_count = board.num_diagonals(p, BoardColor::from(c.opponent()));
    // One opponent diagonal is tolerated in the center, none at the edge
    false_count + usize::from(at_edge) < 2
}

/// Play one random legal move for the side to move, or pass if there is
/// none. Returns the point played.
pub fn play_random_move(board: &mut Board, rng: &mut fastrand::Rng, stats: &mut GameStats) -> Point {
    let c = board.to_play();
    let points = board.geometry().points();
    let mut candidates: Vec<Point> = Vec::with_capacity(points.len());
    // Start at a random point and wrap around
    let start = rng.usize(..points.len());
    for &p in points[start..].iter().chain(&points[..start]) {
        if board.is_empty(p) && !is_eye(board, p, c) {
            candidates.push(p);
        }
    }

    let n = candidates.len();
    for i in 0..n {
        let j = i + rng.usize(..n - i);
        candidates.swap(i, j);
        let p = candidates[i];
        if board.play(p, c).is_err() {
            break;
        }
        let info = board.last_move_info();
        if info.repetition {
            stats.repetitions += 1;
        }
        if !board.is_legal() {
            stats.rejected += 1;
            board.undo_last();
            continue;
        }
        stats.moves += 1;
        stats.captures[c.index()] += board.captured_stones().len();
        if info.suicide {
            stats.suicides += 1;
        }
        return p;
    }

    if board.play(PASS, c).is_ok() {
        stats.passes += 1;
    }
    PASS
}

/// Play random moves until two passes in a row or the history nears
/// capacity. With `check`, the full consistency pass runs after every move.
pub fn play_random_game(board: &mut Board, rng: &mut fastrand::Rng, check: bool) -> Result<GameStats, ConsistencyError> {
    let mut stats = GameStats {
        games: 1,
        ..Default::default()
    };
    let mut passes = 0;
    while passes < 2 && !board.stack_overflow_likely() {
        if play_random_move(board, rng, &mut stats) == PASS {
            passes += 1;
        } else {
            passes = 0;
        }
        if check {
            board.check_consistency()?;
        }
    }
    log::debug!(
        "random game over after {} moves, {} rejected",
        board.move_number(),
        stats.rejected
    );
    Ok(stats)
}
