//! Snapshot and restore.
//!
//! A snapshot copies the board state and every block that is on the board.
//! Restoring truncates the history and the block arena back to their sizes
//! at snapshot time and copies the saved data back, so jumping back costs
//! the size of the board rather than the number of moves played since.
//!
//! Blocks that were captured or merged away before the snapshot are not
//! copied: nothing changes them while they are off the board, and the
//! history entries that refer to them survive the truncation.

use crate::block::{Block, BlockId};
use crate::board::{Board, State};
use crate::error::BoardError;

#[derive(Clone)]
pub(crate) struct Snapshot {
    pub move_number: usize,
    num_blocks: usize,
    state: State,
    blocks: Vec<(BlockId, Block)>,
}

impl Board {
    /// Remember the current position. Replaces any earlier snapshot.
    pub fn take_snapshot(&mut self) {
        let mut seen = vec![false; self.blocks.len()];
        let mut live = Vec::new();
        for &p in self.geometry.points() {
            if let Some(b) = self.state.block[p] {
                if !std::mem::replace(&mut seen[b], true) {
                    live.push((b, self.blocks[b].clone()));
                }
            }
        }
        log::debug!(
            "snapshot at move {} with {} live blocks",
            self.moves.len(),
            live.len()
        );
        self.snapshot = Some(Box::new(Snapshot {
            move_number: self.moves.len(),
            num_blocks: self.blocks.len(),
            state: self.state.clone(),
            blocks: live,
        }));
    }

    /// Go back to the position of the last snapshot.
    ///
    /// The snapshot is kept and can be restored again. Fails with
    /// [`BoardError::NoSnapshot`] if none was taken, or if moves were undone
    /// below it since, which discards it.
    pub fn restore_snapshot(&mut self) -> Result<(), BoardError> {
        let Some(snapshot) = self.snapshot.as_deref() else {
            return Err(BoardError::NoSnapshot);
        };
        debug_assert!(snapshot.move_number <= self.moves.len());
        if snapshot.move_number == self.moves.len() {
            return Ok(());
        }
        log::debug!(
            "restore snapshot: move {} -> {}",
            self.moves.len(),
            snapshot.move_number
        );
        self.moves.truncate(snapshot.move_number);
        self.blocks.truncate(snapshot.num_blocks);
        self.state.clone_from(&snapshot.state);
        for (id, block) in &snapshot.blocks {
            self.blocks[*id].clone_from(block);
        }
        self.move_info = Default::default();
        self.captured_stones.clear();
        Ok(())
    }

    #[inline]
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Move number the snapshot was taken at.
    pub fn snapshot_move_number(&self) -> Option<usize> {
        self.snapshot.as_ref().map(|s| s.move_number)
    }
}
