//! Full recomputation of the incremental board state.
//!
//! [`Board::check_consistency`] rebuilds colors, neighbor counts, stone
//! counts, the hash, prisoners and every block (by flood fill) from scratch
//! and compares them with what the board maintains incrementally. It is too
//! slow for normal play; tests call it directly, and the
//! `consistency-checks` feature runs it around every `play` and `undo`.

use crate::block::nb4;
use crate::board::Board;
use crate::constants::MAX_POINT;
use crate::error::ConsistencyError;
use crate::point::{BoardColor, Color, Point};
use crate::zobrist::HashCode;

impl Board {
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let state = &self.state;
        for p in 0..MAX_POINT {
            if !self.geometry.is_on_board(p) && state.color[p] != BoardColor::Border {
                return Err(ConsistencyError::new(p, "off-board point is not border"));
            }
        }

        let mut hash: HashCode = 0;
        let mut num_stones = [0usize; 2];
        for &p in self.geometry.points() {
            match (state.color[p].stone(), state.block[p]) {
                (None, None) if state.color[p] == BoardColor::Empty => {}
                (Some(c), Some(b)) => {
                    if b >= self.blocks.len() {
                        return Err(ConsistencyError::new(p, format!("block index {b} out of range")));
                    }
                    if self.blocks[b].color() != c {
                        return Err(ConsistencyError::new(p, "block color differs from stone color"));
                    }
                    hash ^= self.zobrist.stone(p, c);
                    num_stones[c.index()] += 1;
                }
                (_, block) => {
                    return Err(ConsistencyError::new(
                        p,
                        format!("color {:?} with block {block:?}", state.color[p]),
                    ));
                }
            }

            let mut empty = 0u8;
            let mut stones = [0u8; 2];
            for nb in nb4(p) {
                match state.color[nb] {
                    BoardColor::Empty => empty += 1,
                    BoardColor::Black => stones[0] += 1,
                    BoardColor::White => stones[1] += 1,
                    BoardColor::Border => {}
                }
            }
            if state.nu_neighbors_empty[p] != empty {
                return Err(ConsistencyError::new(
                    p,
                    format!("{} empty neighbors recorded, {empty} found", state.nu_neighbors_empty[p]),
                ));
            }
            for c in Color::BOTH {
                if state.nu_neighbors[c.index()][p] != stones[c.index()] {
                    return Err(ConsistencyError::new(p, format!("wrong {c} neighbor count")));
                }
            }
        }

        if hash != state.hash {
            return Err(ConsistencyError::new(0, format!("hash {:#x}, recomputed {hash:#x}", state.hash)));
        }
        if num_stones != state.num_stones {
            return Err(ConsistencyError::new(
                0,
                format!("stone counts {:?}, recomputed {num_stones:?}", state.num_stones),
            ));
        }

        let mut visited = [false; MAX_POINT];
        for &p in self.geometry.points() {
            if state.block[p].is_some() && !visited[p] {
                self.check_block(p, &mut visited)?;
            }
        }

        self.check_prisoners()?;

        if let Some(ko) = state.ko_point {
            if !self.is_empty(ko) {
                return Err(ConsistencyError::new(ko, "ko point is occupied"));
            }
        }
        Ok(())
    }

    /// Compare the block at `start` with a flood fill.
    fn check_block(&self, start: Point, visited: &mut [bool; MAX_POINT]) -> Result<(), ConsistencyError> {
        let Some(b) = self.state.block[start] else {
            return Ok(());
        };
        let color = self.state.color[start];
        let mut stones = Vec::new();
        let mut libs = Vec::new();
        let mut lib_seen = [false; MAX_POINT];
        let mut stack = vec![start];
        visited[start] = true;
        while let Some(p) = stack.pop() {
            if self.state.block[p] != Some(b) {
                return Err(ConsistencyError::new(p, "connected stones in different blocks"));
            }
            stones.push(p);
            for nb in nb4(p) {
                let c = self.state.color[nb];
                if c == color && !visited[nb] {
                    visited[nb] = true;
                    stack.push(nb);
                } else if c == BoardColor::Empty && !std::mem::replace(&mut lib_seen[nb], true) {
                    libs.push(nb);
                }
            }
        }
        stones.sort_unstable();
        libs.sort_unstable();

        let block = &self.blocks[b];
        let mut recorded = block.stones().to_vec();
        recorded.sort_unstable();
        if recorded != stones {
            return Err(ConsistencyError::new(
                start,
                format!("block has {} stones, flood fill finds {}", recorded.len(), stones.len()),
            ));
        }
        let mut recorded = block.liberties().to_vec();
        recorded.sort_unstable();
        if recorded != libs {
            return Err(ConsistencyError::new(
                start,
                format!("block has liberties {recorded:?}, flood fill finds {libs:?}"),
            ));
        }
        if block.anchor() != stones[0] {
            return Err(ConsistencyError::new(start, "anchor is not the smallest stone"));
        }
        Ok(())
    }

    /// Prisoners must add up to the captures recorded in the history.
    fn check_prisoners(&self) -> Result<(), ConsistencyError> {
        let mut prisoners = [0usize; 2];
        for entry in &self.moves {
            for &b in &entry.killed {
                prisoners[entry.color.index()] += self.blocks[b].num_stones();
            }
            if let Some(b) = entry.suicide {
                prisoners[entry.color.opponent().index()] += self.blocks[b].num_stones();
            }
        }
        if prisoners != self.state.prisoners {
            return Err(ConsistencyError::new(
                0,
                format!("prisoners {:?}, history says {prisoners:?}", self.state.prisoners),
            ));
        }
        Ok(())
    }

    #[cfg(feature = "consistency-checks")]
    pub(crate) fn assert_consistent(&self) {
        if let Err(e) = self.check_consistency() {
            panic!("{e}\n{self}");
        }
    }
}
