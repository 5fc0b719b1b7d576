//! Blocks (maximal connected groups of same-colored stones) and their
//! incremental maintenance.
//!
//! Blocks live in a [`BlockArena`] and are referred to by index. The arena
//! behaves like a stack: every stone placement that does not extend an
//! existing block pushes one new block, and undoing that move pops it. A
//! captured block stays in its slot untouched, owned by the history entry
//! that captured it, until that entry is undone and the block is put back
//! on the board.
//!
//! Blocks are never split. Placing a stone can only join blocks, and a
//! block leaves the board as a whole when it is captured, so the registry
//! only needs to create, extend and merge.

use smallvec::SmallVec;

use crate::board::Board;
use crate::constants::{MAX_POINT, NS, WE};
use crate::history::StackEntry;
use crate::point::{BoardColor, Color, Point};

/// Index of a block in the arena.
pub type BlockId = usize;

/// Up to four distinct blocks around a point.
pub(crate) type AdjBlocks = SmallVec<[BlockId; 4]>;

#[derive(Clone, Debug)]
pub struct Block {
    color: Color,
    anchor: Point,
    stones: Vec<Point>,
    liberties: Vec<Point>,
}

impl Block {
    fn new(color: Color, anchor: Point) -> Self {
        Self {
            color,
            anchor,
            stones: vec![anchor],
            liberties: Vec::with_capacity(4),
        }
    }

    /// Reuse this slot for a new single-stone block without freeing its
    /// buffers.
    fn reset(&mut self, color: Color, anchor: Point) {
        self.color = color;
        self.anchor = anchor;
        self.stones.clear();
        self.stones.push(anchor);
        self.liberties.clear();
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Smallest point of the block.
    #[inline]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    #[inline]
    pub fn stones(&self) -> &[Point] {
        &self.stones
    }

    #[inline]
    pub fn liberties(&self) -> &[Point] {
        &self.liberties
    }

    #[inline]
    pub fn num_stones(&self) -> usize {
        self.stones.len()
    }

    #[inline]
    pub fn num_liberties(&self) -> usize {
        self.liberties.len()
    }

    #[inline]
    pub(crate) fn append_stone(&mut self, p: Point) {
        self.stones.push(p);
    }

    #[inline]
    pub(crate) fn pop_stone(&mut self) {
        self.stones.pop();
    }

    #[inline]
    pub(crate) fn append_liberty(&mut self, p: Point) {
        self.liberties.push(p);
    }

    #[inline]
    pub(crate) fn exclude_liberty(&mut self, p: Point) {
        if let Some(i) = self.liberties.iter().position(|&l| l == p) {
            self.liberties.swap_remove(i);
        }
    }

    #[inline]
    pub(crate) fn update_anchor(&mut self, p: Point) {
        if p < self.anchor {
            self.anchor = p;
        }
    }

    #[inline]
    pub(crate) fn set_anchor(&mut self, p: Point) {
        self.anchor = p;
    }
}

/// Stack of block records addressed by [`BlockId`].
///
/// Popped slots keep their allocations and are reused by the next push, so
/// steady-state play does not allocate.
#[derive(Clone, Debug, Default)]
pub struct BlockArena {
    blocks: Vec<Block>,
    len: usize,
}

impl BlockArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks in use, live or captured.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Push a single-stone block and return its index.
    pub(crate) fn alloc(&mut self, color: Color, anchor: Point) -> BlockId {
        let id = self.len;
        if id < self.blocks.len() {
            self.blocks[id].reset(color, anchor);
        } else {
            self.blocks.push(Block::new(color, anchor));
        }
        self.len += 1;
        id
    }

    pub(crate) fn pop(&mut self) {
        debug_assert!(self.len > 0, "pop from empty block arena");
        self.len -= 1;
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        debug_assert!(len <= self.len);
        self.len = len;
    }

    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }
}

impl std::ops::Index<BlockId> for BlockArena {
    type Output = Block;

    #[inline]
    fn index(&self, id: BlockId) -> &Block {
        debug_assert!(id < self.len, "stale block index {id}");
        &self.blocks[id]
    }
}

impl std::ops::IndexMut<BlockId> for BlockArena {
    #[inline]
    fn index_mut(&mut self, id: BlockId) -> &mut Block {
        debug_assert!(id < self.len, "stale block index {id}");
        &mut self.blocks[id]
    }
}

/// The four orthogonal neighbors by offset. Valid for any on-board point
/// thanks to the border ring.
#[inline]
pub(crate) fn nb4(p: Point) -> [Point; 4] {
    [p - NS, p - WE, p + WE, p + NS]
}

// Registry operations. They work on the board's per-point state, so they
// are methods of `Board`.
impl Board {
    /// Distinct blocks of any color adjacent to `p`.
    pub(crate) fn adjacent_blocks_any(&self, p: Point) -> AdjBlocks {
        let mut result = AdjBlocks::new();
        if self.state.nu_neighbors[0][p] == 0 && self.state.nu_neighbors[1][p] == 0 {
            return result;
        }
        for nb in nb4(p) {
            if let Some(b) = self.state.block[nb] {
                if !result.contains(&b) {
                    result.push(b);
                }
            }
        }
        result
    }

    /// Distinct blocks of color `c` adjacent to `p`.
    pub(crate) fn adjacent_blocks_of(&self, p: Point, c: Color) -> AdjBlocks {
        let mut result = AdjBlocks::new();
        if self.state.nu_neighbors[c.index()][p] == 0 {
            return result;
        }
        let bc = BoardColor::from(c);
        for nb in nb4(p) {
            if self.state.color[nb] != bc {
                continue;
            }
            // The stone just placed has no block yet
            if let Some(b) = self.state.block[nb] {
                if !result.contains(&b) {
                    result.push(b);
                }
            }
        }
        result
    }

    #[inline]
    pub(crate) fn is_adjacent_to_block(&self, p: Point, b: BlockId) -> bool {
        nb4(p).iter().any(|&nb| self.state.block[nb] == Some(b))
    }

    /// New block for a stone at `p` with no friendly neighbors.
    pub(crate) fn create_single_stone_block(&mut self, p: Point, c: Color) {
        debug_assert_eq!(self.state.color[p], BoardColor::from(c));
        debug_assert_eq!(self.state.nu_neighbors[c.index()][p], 0);
        let b = self.blocks.alloc(c, p);
        for nb in nb4(p) {
            if self.state.color[nb] == BoardColor::Empty {
                self.blocks[b].append_liberty(nb);
            }
        }
        self.state.block[p] = Some(b);
    }

    /// Extend block `b` by the stone at `p`, recording the liberties this
    /// adds so undo can take them away again.
    pub(crate) fn add_stone_to_block(&mut self, p: Point, c: Color, b: BlockId, entry: &mut StackEntry) {
        debug_assert_eq!(self.state.color[p], BoardColor::from(c));
        self.blocks[b].append_stone(p);
        entry.new_libs.clear();
        for nb in nb4(p) {
            if self.state.color[nb] == BoardColor::Empty && !self.is_adjacent_to_block(nb, b) {
                self.blocks[b].append_liberty(nb);
                entry.new_libs.push(nb);
            }
        }
        entry.old_anchor = self.blocks[b].anchor();
        self.blocks[b].update_anchor(p);
        self.state.block[p] = Some(b);
    }

    /// Join the stone at `p` and all of `adj` into one new block. The input
    /// blocks stay in the arena unchanged so undo can repoint their stones.
    pub(crate) fn merge_blocks(&mut self, p: Point, c: Color, adj: &[BlockId]) {
        debug_assert_eq!(self.state.color[p], BoardColor::from(c));
        debug_assert!(adj.len() > 1);
        let merged = self.blocks.alloc(c, p);
        let mut mark = [false; MAX_POINT];
        for &old in adj {
            for i in 0..self.blocks[old].num_stones() {
                let stn = self.blocks[old].stones()[i];
                self.blocks[merged].append_stone(stn);
                self.state.block[stn] = Some(merged);
            }
            for i in 0..self.blocks[old].num_liberties() {
                let lib = self.blocks[old].liberties()[i];
                if !std::mem::replace(&mut mark[lib], true) {
                    self.blocks[merged].append_liberty(lib);
                }
            }
            let anchor = self.blocks[old].anchor();
            self.blocks[merged].update_anchor(anchor);
        }
        self.state.block[p] = Some(merged);
        for nb in nb4(p) {
            if self.state.color[nb] == BoardColor::Empty && !std::mem::replace(&mut mark[nb], true) {
                self.blocks[merged].append_liberty(nb);
            }
        }
    }

    /// `p` became empty: it is a liberty again for every adjacent block.
    pub(crate) fn add_liberty(&mut self, p: Point) {
        for b in self.adjacent_blocks_any(p) {
            self.blocks[b].append_liberty(p);
        }
    }

    /// `p` became empty: it is a liberty again for adjacent blocks of `c`.
    pub(crate) fn add_liberty_of(&mut self, p: Point, c: Color) {
        for b in self.adjacent_blocks_of(p, c) {
            self.blocks[b].append_liberty(p);
        }
    }

    /// `p` became occupied: drop it from adjacent blocks of `c`.
    pub(crate) fn remove_liberty_of(&mut self, p: Point, c: Color) {
        for b in self.adjacent_blocks_of(p, c) {
            self.blocks[b].exclude_liberty(p);
        }
    }

    /// Take block `b` off the board. The block record itself is kept.
    pub(crate) fn kill_block(&mut self, b: BlockId) {
        let c = self.blocks[b].color();
        let opp = c.opponent();
        let n = self.blocks[b].num_stones();
        for i in 0..n {
            let stn = self.blocks[b].stones()[i];
            self.add_liberty_of(stn, opp);
            self.remove_stone_for_undo(stn);
            self.captured_stones.push(stn);
            self.state.block[stn] = None;
        }
        self.state.num_stones[c.index()] -= n;
        self.state.prisoners[opp.index()] += n;
        if n == 1 {
            // Single stone captured; whether it is a ko is decided once the
            // capturing block is known
            self.state.ko_point = Some(self.blocks[b].anchor());
        }
    }

    /// Put a captured block back on the board.
    pub(crate) fn restore_kill(&mut self, b: BlockId) {
        let c = self.blocks[b].color();
        let opp = c.opponent();
        let n = self.blocks[b].num_stones();
        for i in 0..n {
            let stn = self.blocks[b].stones()[i];
            self.add_stone(stn, c);
            self.state.block[stn] = Some(b);
            self.remove_liberty_of(stn, opp);
        }
        self.state.num_stones[c.index()] += n;
        debug_assert!(self.state.prisoners[opp.index()] >= n);
        self.state.prisoners[opp.index()] -= n;
    }

    /// Build the block containing `anchor` from scratch by flood fill. Used
    /// for setup stones.
    pub(crate) fn init_block(&mut self, c: Color, anchor: Point) {
        let b = self.blocks.alloc(c, anchor);
        let bc = BoardColor::from(c);
        let mut mark = [false; MAX_POINT];
        let mut stack: Vec<Point> = vec![anchor];
        mark[anchor] = true;
        // The arena starts the block with its anchor; collect the rest
        let mut first = true;
        while let Some(p) = stack.pop() {
            match self.state.color[p] {
                BoardColor::Empty => self.blocks[b].append_liberty(p),
                col if col == bc => {
                    if !first {
                        self.blocks[b].append_stone(p);
                    }
                    first = false;
                    self.blocks[b].update_anchor(p);
                    self.state.block[p] = Some(b);
                    for nb in nb4(p) {
                        if self.state.color[nb] != BoardColor::Border && !std::mem::replace(&mut mark[nb], true) {
                            stack.push(nb);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}
