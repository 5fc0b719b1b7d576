//! Move execution and undo.
//!
//! `play` updates the board in place and records a history entry; `undo`
//! replays that entry backwards. Neither recomputes anything from scratch:
//! the cost of a move is proportional to the stones it touches.

use crate::board::Board;
use crate::constants::{HISTORY_RESERVE, MAX_NUM_MOVES, PASS};
use crate::error::BoardError;
use crate::history::{MoveInfo, StackEntry};
use crate::point::{Color, Point, str_coord};

impl Board {
    /// Play a stone of color `c` at `p`, or pass with [`PASS`].
    ///
    /// The move is always applied when it returns `Ok`, even if it breaks
    /// the rules; see [`is_legal`](Board::is_legal). Errors leave the board
    /// unchanged and are reserved for calls that can never be a move: a
    /// point off the board, an occupied point, or a full history.
    pub fn play(&mut self, p: Point, c: Color) -> Result<(), BoardError> {
        if p != PASS {
            if !self.is_valid_point(p) {
                return Err(BoardError::InvalidPoint(p));
            }
            if !self.is_empty(p) {
                return Err(BoardError::Occupied(p));
            }
        }
        if self.moves.len() >= MAX_NUM_MOVES {
            return Err(BoardError::HistoryFull);
        }
        #[cfg(feature = "consistency-checks")]
        self.assert_consistent();

        self.count_play += 1;
        let mut entry = StackEntry::new(p, c);
        self.save_state(&mut entry);
        self.state.ko_point = None;
        self.captured_stones.clear();
        self.move_info = MoveInfo::default();
        let opp = c.opponent();

        if p == PASS {
            self.state.to_play = opp;
            self.push_entry(entry);
            return Ok(());
        }

        // First stone ever on this point: no earlier position can match
        let was_first = self.state.is_first[p];
        self.add_stone_for_undo(p, c);
        self.state.num_stones[c.index()] += 1;
        self.remove_liberty_and_kill(p, opp, &mut entry);
        if !entry.killed.is_empty() {
            self.move_info.capturing = true;
            self.state.is_new_position &= was_first;
        }
        self.update_blocks_after_add_stone(p, c, &mut entry);
        if self.state.ko_point.is_some() && (self.num_stones(p) > 1 || self.num_liberties(p) > 1) {
            self.state.ko_point = None;
        }
        let mut legal = self.check_suicide(p, &mut entry);
        let suicide = entry.suicide.is_some();
        self.state.to_play = opp;
        self.push_entry(entry);

        if (!was_first || suicide) && !self.state.is_new_position && !self.check_ko() {
            legal = false;
        }
        if !legal {
            self.move_info.illegal = true;
            log::trace!("illegal move {c} {} {:?}", str_coord(p), self.move_info);
        }

        #[cfg(feature = "consistency-checks")]
        self.assert_consistent();
        Ok(())
    }

    /// Take back the last move.
    pub fn undo(&mut self) -> Result<(), BoardError> {
        if self.moves.is_empty() {
            return Err(BoardError::EmptyHistory);
        }
        self.undo_last();
        Ok(())
    }

    /// Undo with a non-empty history.
    pub(crate) fn undo_last(&mut self) {
        #[cfg(feature = "consistency-checks")]
        self.assert_consistent();

        let Some(entry) = self.moves.pop() else {
            return;
        };
        self.restore_state(&entry);
        self.update_blocks_after_undo(&entry);
        if self.snapshot.as_ref().is_some_and(|s| s.move_number > self.moves.len()) {
            log::debug!("undo below snapshot, dropping it");
            self.snapshot = None;
        }

        #[cfg(feature = "consistency-checks")]
        self.assert_consistent();
    }

    fn push_entry(&mut self, entry: StackEntry) {
        self.moves.push(entry);
        if self.moves.len() == MAX_NUM_MOVES - HISTORY_RESERVE {
            log::warn!("move history nearly full ({} of {MAX_NUM_MOVES})", self.moves.len());
        }
    }

    fn save_state(&self, entry: &mut StackEntry) {
        entry.hash = self.state.hash;
        if entry.point != PASS {
            entry.is_first = self.state.is_first[entry.point];
            entry.is_new_position = self.state.is_new_position;
        }
        entry.to_play = self.state.to_play;
        entry.ko_point = self.state.ko_point;
    }

    fn restore_state(&mut self, entry: &StackEntry) {
        self.state.hash = entry.hash;
        self.state.ko_point = entry.ko_point;
        if entry.point != PASS {
            self.state.is_first[entry.point] = entry.is_first;
            self.state.is_new_position = entry.is_new_position;
        }
        self.state.to_play = entry.to_play;
    }

    /// Remove liberty `p` from adjacent blocks and capture opponent blocks
    /// left without liberties.
    fn remove_liberty_and_kill(&mut self, p: Point, opp: Color, entry: &mut StackEntry) {
        entry.killed.clear();
        for b in self.adjacent_blocks_any(p) {
            self.blocks[b].exclude_liberty(p);
            if self.blocks[b].color() == opp && self.blocks[b].num_liberties() == 0 {
                entry.killed.push(b);
                self.kill_block(b);
            }
        }
    }

    fn update_blocks_after_add_stone(&mut self, p: Point, c: Color, entry: &mut StackEntry) {
        let adj = self.adjacent_blocks_of(p, c);
        match adj.len() {
            0 => {
                entry.stone_added_to = None;
                self.create_single_stone_block(p, c);
            }
            1 => {
                entry.stone_added_to = Some(adj[0]);
                self.add_stone_to_block(p, c, adj[0], entry);
            }
            _ => {
                entry.stone_added_to = None;
                self.merge_blocks(p, c, &adj);
                entry.merged = adj;
            }
        }
    }

    /// Remove the block at `p` if it has no liberties. Returns false for a
    /// suicide the rules forbid.
    fn check_suicide(&mut self, p: Point, entry: &mut StackEntry) -> bool {
        if self.num_liberties(p) > 0 {
            return true;
        }
        let b = self.block_at(p);
        entry.suicide = Some(b);
        self.kill_block(b);
        // Own stones are not captures and never make a ko
        self.captured_stones.clear();
        self.state.ko_point = None;
        // Removing stones can bring back an earlier position
        self.state.is_new_position = false;
        self.move_info.suicide = true;
        self.rules.allow_suicide
    }

    fn update_blocks_after_undo(&mut self, entry: &StackEntry) {
        let p = entry.point;
        if p == PASS {
            return;
        }
        let c = entry.color;
        if let Some(b) = entry.suicide {
            self.restore_kill(b);
        }
        self.remove_stone(p);
        self.state.num_stones[c.index()] -= 1;
        self.state.block[p] = None;
        match entry.stone_added_to {
            Some(b) => {
                let block = &mut self.blocks[b];
                block.pop_stone();
                for &lib in &entry.new_libs {
                    block.exclude_liberty(lib);
                }
                block.set_anchor(entry.old_anchor);
            }
            None => {
                for &b in &entry.merged {
                    for i in 0..self.blocks[b].num_stones() {
                        let stn = self.blocks[b].stones()[i];
                        self.state.block[stn] = Some(b);
                    }
                }
                self.blocks.pop();
            }
        }
        for &b in &entry.killed {
            self.restore_kill(b);
        }
        self.add_liberty(p);
    }
}

#[cfg(test)]
mod tests {
    use crate::constants::NULL_MOVE;
    use crate::point::pt;
    use crate::{Board, BoardError, Color, Rules, Setup};

    fn board(size: usize) -> Board {
        Board::new(size, Rules::default(), Setup::new()).unwrap()
    }

    #[test]
    fn test_play_errors_leave_board_unchanged() {
        let mut b = board(9);
        b.play(pt(5, 5), Color::Black).unwrap();
        let hash = b.hash();
        assert_eq!(b.play(pt(5, 5), Color::White), Err(BoardError::Occupied(pt(5, 5))));
        assert_eq!(b.play(pt(10, 1), Color::White), Err(BoardError::InvalidPoint(pt(10, 1))));
        assert_eq!(b.play(NULL_MOVE, Color::White), Err(BoardError::InvalidPoint(NULL_MOVE)));
        assert_eq!(b.hash(), hash);
        assert_eq!(b.move_number(), 1);
        assert_eq!(b.count_play(), 1);
    }

    #[test]
    fn test_undo_empty_history() {
        let mut b = board(9);
        assert_eq!(b.undo(), Err(BoardError::EmptyHistory));
    }

    #[test]
    fn test_pass() {
        let mut b = board(9);
        b.play(crate::PASS, Color::Black).unwrap();
        assert_eq!(b.to_play(), Color::White);
        assert_eq!(b.move_number(), 1);
        assert!(b.is_legal());
        assert_eq!(b.last_move(), crate::PASS);
        b.undo().unwrap();
        assert_eq!(b.to_play(), Color::Black);
    }

    #[test]
    fn test_single_capture_sets_ko_point() {
        let (setup, size) = Setup::from_diagram(
            ".XO.\n\
             XO.O\n\
             .XO.\n\
             ....",
        )
        .unwrap();
        let mut b = Board::new(size, Rules::default(), setup).unwrap();
        b.play(pt(3, 3), Color::Black).unwrap();
        assert!(b.capturing_move());
        assert_eq!(b.captured_stones(), &[pt(2, 3)]);
        assert_eq!(b.ko_point(), Some(pt(2, 3)));
        assert_eq!(b.num_prisoners(Color::Black), 1);
        b.undo().unwrap();
        assert_eq!(b.ko_point(), None);
        assert_eq!(b.num_prisoners(Color::Black), 0);
        assert!(b.is_color(pt(2, 3), Color::White));
        assert_eq!(b.num_liberties(pt(2, 3)), 1);
    }
}
