//! Ko and superko detection.
//!
//! Superko is decided without a table of earlier positions. Walking the
//! history backwards, the points whose content differs between the current
//! position and the position before each move are tracked as a set per
//! color; an earlier position repeats when both sets are empty. The walk
//! stops early at a move that put a stone on a never-used point which is
//! still occupied, since every older position has that point empty.

use crate::board::Board;
use crate::constants::{MAX_POINT, PASS};
use crate::point::{BoardColor, Color, Point, str_coord};
use crate::rules::KoRule;

/// Points that differ between two positions, per color.
struct Changes {
    marked: [[bool; MAX_POINT]; 2],
    len: [usize; 2],
    /// Number of toggles so far.
    total: usize,
}

impl Changes {
    fn new() -> Self {
        Self {
            marked: [[false; MAX_POINT]; 2],
            len: [0; 2],
            total: 0,
        }
    }

    fn toggle(&mut self, p: Point, c: Color) {
        let i = c.index();
        let mark = &mut self.marked[i][p];
        *mark = !*mark;
        if *mark {
            self.len[i] += 1;
        } else {
            self.len[i] -= 1;
        }
        self.total += 1;
    }

    fn is_empty(&self) -> bool {
        self.len == [0, 0]
    }
}

impl Board {
    /// Flag a repetition caused by the move just played. Returns false if
    /// the repetition makes the move illegal.
    pub(crate) fn check_ko(&mut self) -> bool {
        if !self.full_board_repetition() {
            return true;
        }
        self.move_info.repetition = true;
        if let Some(e) = self.moves.last() {
            log::trace!(
                "{} {} repeats a position ({})",
                e.color,
                str_coord(e.point),
                self.rules.ko_rule
            );
        }
        self.allow_any_repetition
    }

    /// True if the move just played recreated an earlier position, as the
    /// board's ko rule defines it.
    pub fn full_board_repetition(&self) -> bool {
        match self.rules.ko_rule {
            KoRule::Simple => self
                .moves
                .last()
                .is_some_and(|e| e.ko_point == Some(e.point) && e.color == e.to_play),
            KoRule::PositionalSuperko => self.superko_repetition(false),
            KoRule::SituationalSuperko => self.superko_repetition(true),
        }
    }

    fn superko_repetition(&self, same_to_play: bool) -> bool {
        let mut changes = Changes::new();
        for entry in self.moves.iter().rev() {
            let p = entry.point;
            if p != PASS {
                if entry.is_first && self.state.color[p] == BoardColor::from(entry.color) {
                    return false;
                }
                changes.toggle(p, entry.color);
                for &b in entry.killed.iter().chain(entry.suicide.iter()) {
                    let block = &self.blocks[b];
                    for &stn in block.stones() {
                        changes.toggle(stn, block.color());
                    }
                }
            }
            if changes.total > 0
                && (!same_to_play || entry.to_play == self.state.to_play)
                && changes.is_empty()
            {
                return true;
            }
        }
        false
    }
}
