//! The board: position state, blocks, and move history.
//!
//! [`Board`] keeps the position incrementally up to date. Every point knows
//! its color, the block it belongs to and how many neighbors of each color
//! it has; every block knows its stones and liberties. Playing and undoing a
//! move touch only the points around the move and the blocks involved.
//!
//! Move execution lives in [`play`](crate::play), repetition detection in
//! [`repetition`](crate::repetition) and snapshots in
//! [`snapshot`](crate::snapshot). This module holds the state and the read
//! side.
//!
//! # Example
//!
//! ```
//! use goban_core::{Board, Color, Rules, Setup, pt};
//!
//! let mut board = Board::new(9, Rules::default(), Setup::new()).unwrap();
//! board.play(pt(3, 3), Color::Black).unwrap();
//! assert_eq!(board.num_liberties(pt(3, 3)), 4);
//! assert_eq!(board.to_play(), Color::White);
//! board.undo().unwrap();
//! assert!(board.is_empty(pt(3, 3)));
//! ```

use std::fmt;

use smallvec::SmallVec;

use crate::block::{BlockArena, BlockId, nb4};
use crate::constants::{HISTORY_RESERVE, MAX_NUM_MOVES, MAX_POINT, MAX_SIZE, MIN_SIZE, NS, NULL_MOVE, PASS, WE};
use crate::error::BoardError;
use crate::geometry::Geometry;
use crate::history::{MoveInfo, PlayerMove, StackEntry};
use crate::point::{BoardColor, Color, Point, pt, str_coord};
use crate::rules::Rules;
use crate::setup::Setup;
use crate::snapshot::Snapshot;
use crate::zobrist::{HashCode, ZobristTable};

/// Per-point and global values that change with every move.
///
/// Kept in one plain struct so a snapshot can copy it in one go.
#[derive(Clone)]
pub(crate) struct State {
    pub ko_point: Option<Point>,
    pub to_play: Color,
    pub hash: HashCode,
    pub color: [BoardColor; MAX_POINT],
    pub block: [Option<BlockId>; MAX_POINT],
    /// Stones captured by each color.
    pub prisoners: [usize; 2],
    pub num_stones: [usize; 2],
    pub nu_neighbors_empty: [u8; MAX_POINT],
    pub nu_neighbors: [[u8; MAX_POINT]; 2],
    /// No stone has been placed on the point in this game yet.
    pub is_first: [bool; MAX_POINT],
    /// No capture of a non-first stone has happened, so every position in
    /// the game so far differs from all earlier ones.
    pub is_new_position: bool,
}

impl State {
    fn new() -> Self {
        Self {
            ko_point: None,
            to_play: Color::Black,
            hash: 0,
            color: [BoardColor::Border; MAX_POINT],
            block: [None; MAX_POINT],
            prisoners: [0; 2],
            num_stones: [0; 2],
            nu_neighbors_empty: [0; MAX_POINT],
            nu_neighbors: [[0; MAX_POINT]; 2],
            is_first: [true; MAX_POINT],
            is_new_position: true,
        }
    }
}

/// A Go board with incremental block tracking and full undo.
///
/// # Two-phase moves
///
/// [`play`](Board::play) always applies the move, even one that breaks the
/// rules (suicide when disallowed, ko or superko repetition). Such a move is
/// flagged: check [`is_legal`](Board::is_legal) or
/// [`last_move_info`](Board::last_move_info) right after playing, and call
/// [`undo`](Board::undo) if the move should not stand. Search code relies on
/// play-check-undo being cheaper than validating first.
///
/// # Panics
///
/// Block queries (`num_liberties`, `anchor`, `stones`, ...) panic when asked
/// about a point without a stone.
#[derive(Clone)]
pub struct Board {
    pub(crate) geometry: &'static Geometry,
    pub(crate) zobrist: &'static ZobristTable,
    pub(crate) rules: Rules,
    pub(crate) setup: Setup,
    pub(crate) state: State,
    pub(crate) blocks: BlockArena,
    pub(crate) moves: Vec<StackEntry>,
    pub(crate) snapshot: Option<Box<Snapshot>>,
    pub(crate) move_info: MoveInfo,
    pub(crate) captured_stones: Vec<Point>,
    pub(crate) allow_any_repetition: bool,
    pub(crate) count_play: u64,
}

impl Board {
    /// Create a board of `size` with `setup` stones on it.
    pub fn new(size: usize, rules: Rules, setup: Setup) -> Result<Self, BoardError> {
        let geometry = geometry_for(size)?;
        setup.validate(geometry)?;
        let mut board = Board {
            geometry,
            zobrist: ZobristTable::global(),
            rules,
            setup,
            state: State::new(),
            blocks: BlockArena::new(),
            moves: Vec::with_capacity(MAX_NUM_MOVES),
            snapshot: None,
            move_info: MoveInfo::default(),
            captured_stones: Vec::new(),
            allow_any_repetition: false,
            count_play: 0,
        };
        board.init_state();
        Ok(board)
    }

    /// Reset to a new game. Clears the history and any snapshot.
    pub fn init(&mut self, size: usize, rules: Rules, setup: Setup) -> Result<(), BoardError> {
        let geometry = geometry_for(size)?;
        setup.validate(geometry)?;
        self.geometry = geometry;
        self.rules = rules;
        self.setup = setup;
        self.init_state();
        Ok(())
    }

    fn init_state(&mut self) {
        let geometry = self.geometry;
        let size = geometry.size();
        log::debug!(
            "init {size}x{size} board, {} setup stones, {:?}",
            self.setup.black.len() + self.setup.white.len(),
            self.rules
        );
        self.state = State::new();
        self.blocks.clear();
        self.moves.clear();
        self.snapshot = None;
        self.move_info = MoveInfo::default();
        self.captured_stones.clear();

        // Border points start at four so stone placement never underflows
        // their counts; only on-board counts are ever read
        self.state.nu_neighbors_empty = [4; MAX_POINT];
        for &p in geometry.points() {
            self.state.color[p] = BoardColor::Empty;
        }
        for &p in geometry.points() {
            self.state.nu_neighbors_empty[p] =
                nb4(p).iter().filter(|&&nb| self.state.color[nb] == BoardColor::Empty).count() as u8;
        }

        for c in Color::BOTH {
            for i in 0..self.setup.stones(c).len() {
                let p = self.setup.stones(c)[i];
                self.add_stone(p, c);
                self.state.hash ^= self.zobrist.stone(p, c);
                self.state.num_stones[c.index()] += 1;
                self.state.is_first[p] = false;
            }
        }
        self.state.to_play = self.setup.to_play;

        for &p in geometry.points() {
            if let Some(c) = self.state.color[p].stone() {
                if self.state.block[p].is_none() {
                    self.init_block(c, p);
                }
            }
        }
    }

    // =========================================================================
    // Low-level stone placement
    // =========================================================================

    /// Put a stone on `p` and update neighbor counts. No blocks, no hash.
    pub(crate) fn add_stone(&mut self, p: Point, c: Color) {
        debug_assert_eq!(self.state.color[p], BoardColor::Empty);
        self.state.color[p] = BoardColor::from(c);
        for nb in nb4(p) {
            self.state.nu_neighbors_empty[nb] -= 1;
            self.state.nu_neighbors[c.index()][nb] += 1;
        }
    }

    /// Remove the stone on `p` and update neighbor counts. No blocks, no
    /// hash.
    pub(crate) fn remove_stone(&mut self, p: Point) {
        let c = match self.state.color[p].stone() {
            Some(c) => c,
            None => panic!("no stone to remove at {}", str_coord(p)),
        };
        self.state.color[p] = BoardColor::Empty;
        for nb in nb4(p) {
            self.state.nu_neighbors_empty[nb] += 1;
            self.state.nu_neighbors[c.index()][nb] -= 1;
        }
    }

    /// Place a stone as part of a move: also updates the hash and the
    /// first-occupation mark.
    pub(crate) fn add_stone_for_undo(&mut self, p: Point, c: Color) {
        self.state.is_first[p] = false;
        self.state.hash ^= self.zobrist.stone(p, c);
        self.add_stone(p, c);
    }

    pub(crate) fn remove_stone_for_undo(&mut self, p: Point) {
        if let Some(c) = self.state.color[p].stone() {
            self.state.hash ^= self.zobrist.stone(p, c);
        }
        self.remove_stone(p);
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    #[inline]
    pub fn size(&self) -> usize {
        self.geometry.size()
    }

    #[inline]
    pub fn geometry(&self) -> &'static Geometry {
        self.geometry
    }

    #[inline]
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Change the rules mid-game. Applies to moves played from now on.
    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    #[inline]
    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    /// Detect repetitions but do not treat them as illegal.
    pub fn set_allow_any_repetition(&mut self, allow: bool) {
        self.allow_any_repetition = allow;
    }

    #[inline]
    pub fn allow_any_repetition(&self) -> bool {
        self.allow_any_repetition
    }

    // =========================================================================
    // Point queries
    // =========================================================================

    /// True if `p` is a playable point on this board.
    #[inline]
    pub fn is_valid_point(&self, p: Point) -> bool {
        self.geometry.is_on_board(p)
    }

    /// Content of `p`. Sentinels such as [`NULL_MOVE`](crate::NULL_MOVE)
    /// and [`RESIGN`](crate::RESIGN) read as border.
    #[inline]
    pub fn get_color(&self, p: Point) -> BoardColor {
        self.state.color.get(p).copied().unwrap_or(BoardColor::Border)
    }

    /// Stone color at `p`, `None` for empty and border points.
    #[inline]
    pub fn get_stone(&self, p: Point) -> Option<Color> {
        self.get_color(p).stone()
    }

    #[inline]
    pub fn is_empty(&self, p: Point) -> bool {
        self.get_color(p) == BoardColor::Empty
    }

    #[inline]
    pub fn is_border(&self, p: Point) -> bool {
        self.get_color(p) == BoardColor::Border
    }

    #[inline]
    pub fn occupied(&self, p: Point) -> bool {
        self.state.block.get(p).is_some_and(Option::is_some)
    }

    #[inline]
    pub fn is_color(&self, p: Point, c: Color) -> bool {
        self.state.color[p] == BoardColor::from(c)
    }

    #[inline]
    pub fn line(&self, p: Point) -> usize {
        self.geometry.line(p)
    }

    #[inline]
    pub fn pos(&self, p: Point) -> usize {
        self.geometry.pos(p)
    }

    /// Number of orthogonal neighbors with a stone of color `c`.
    #[inline]
    pub fn num_neighbors(&self, p: Point, c: Color) -> usize {
        self.state.nu_neighbors[c.index()][p] as usize
    }

    #[inline]
    pub fn num_empty_neighbors(&self, p: Point) -> usize {
        self.state.nu_neighbors_empty[p] as usize
    }

    #[inline]
    pub fn has_neighbors(&self, p: Point, c: Color) -> bool {
        self.state.nu_neighbors[c.index()][p] > 0
    }

    #[inline]
    pub fn has_empty_neighbors(&self, p: Point) -> bool {
        self.state.nu_neighbors_empty[p] > 0
    }

    /// Number of diagonal points with content `c`.
    pub fn num_diagonals(&self, p: Point, c: BoardColor) -> usize {
        [p - NS - WE, p - NS + WE, p + NS - WE, p + NS + WE]
            .iter()
            .filter(|&&d| self.state.color[d] == c)
            .count()
    }

    #[inline]
    pub fn num_empty_diagonals(&self, p: Point) -> usize {
        self.num_diagonals(p, BoardColor::Empty)
    }

    /// True if no stone has been placed on `p` in this game. Setup stones
    /// count as placed.
    #[inline]
    pub fn is_first(&self, p: Point) -> bool {
        self.state.is_first[p]
    }

    /// True if the current position cannot have occurred earlier in the
    /// game.
    #[inline]
    pub fn is_new_position(&self) -> bool {
        self.state.is_new_position
    }

    // =========================================================================
    // Global state
    // =========================================================================

    #[inline]
    pub fn to_play(&self) -> Color {
        self.state.to_play
    }

    #[inline]
    pub fn opponent(&self) -> Color {
        self.state.to_play.opponent()
    }

    pub fn set_to_play(&mut self, c: Color) {
        self.state.to_play = c;
    }

    #[inline]
    pub fn total_num_stones(&self, c: Color) -> usize {
        self.state.num_stones[c.index()]
    }

    pub fn total_num_empty(&self) -> usize {
        let size = self.size();
        size * size - self.state.num_stones[0] - self.state.num_stones[1]
    }

    /// Stones captured by `c` so far.
    #[inline]
    pub fn num_prisoners(&self, c: Color) -> usize {
        self.state.prisoners[c.index()]
    }

    /// Position hash over stones only; the empty board hashes to 0.
    #[inline]
    pub fn hash(&self) -> HashCode {
        self.state.hash
    }

    /// Position hash including the side to move.
    #[inline]
    pub fn hash_incl_to_play(&self) -> HashCode {
        self.state.hash ^ self.zobrist.to_play(self.state.to_play)
    }

    /// Point where the side to move may not immediately recapture a single
    /// stone, if any.
    #[inline]
    pub fn ko_point(&self) -> Option<Point> {
        self.state.ko_point
    }

    // =========================================================================
    // History
    // =========================================================================

    #[inline]
    pub fn move_number(&self) -> usize {
        self.moves.len()
    }

    /// The `i`th move of the game.
    ///
    /// # Panics
    /// If `i >= move_number()`.
    pub fn move_at(&self, i: usize) -> PlayerMove {
        self.moves[i].as_move()
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.moves.is_empty()
    }

    /// True when the history is close to its fixed capacity. Long-running
    /// callers check this before every move.
    #[inline]
    pub fn stack_overflow_likely(&self) -> bool {
        self.moves.len() > MAX_NUM_MOVES - HISTORY_RESERVE
    }

    /// Total number of `play` calls on this board, never decremented.
    #[inline]
    pub fn count_play(&self) -> u64 {
        self.count_play
    }

    /// Last move, if it was played by the opponent of the side to move.
    /// [`NULL_MOVE`] otherwise.
    pub fn last_move(&self) -> Point {
        match self.moves.last() {
            Some(e) if e.color == self.opponent() => e.point,
            _ => NULL_MOVE,
        }
    }

    /// Move before the last one, if the two alternate colors ending with
    /// the opponent. [`NULL_MOVE`] otherwise.
    pub fn second_last_move(&self) -> Point {
        let n = self.moves.len();
        if n < 2 {
            return NULL_MOVE;
        }
        let (m2, m1) = (&self.moves[n - 2], &self.moves[n - 1]);
        if m1.color == self.opponent() && m2.color == self.state.to_play {
            m2.point
        } else {
            NULL_MOVE
        }
    }

    /// Flags of the most recent `play`.
    #[inline]
    pub fn last_move_info(&self) -> MoveInfo {
        self.move_info
    }

    /// Whether the most recent move is legal under the current rules.
    #[inline]
    pub fn is_legal(&self) -> bool {
        !self.move_info.illegal
    }

    /// Opponent stones removed by the most recent move.
    #[inline]
    pub fn captured_stones(&self) -> &[Point] {
        &self.captured_stones
    }

    #[inline]
    pub fn capturing_move(&self) -> bool {
        self.move_info.capturing
    }

    // =========================================================================
    // Block queries
    // =========================================================================

    #[inline]
    pub(crate) fn block_at(&self, p: Point) -> BlockId {
        match self.state.block[p] {
            Some(b) => b,
            None => panic!("no stone at {}", str_coord(p)),
        }
    }

    pub fn num_stones(&self, p: Point) -> usize {
        self.blocks[self.block_at(p)].num_stones()
    }

    pub fn num_liberties(&self, p: Point) -> usize {
        self.blocks[self.block_at(p)].num_liberties()
    }

    /// Smallest point of the block containing `p`.
    pub fn anchor(&self, p: Point) -> Point {
        self.blocks[self.block_at(p)].anchor()
    }

    pub fn stones(&self, p: Point) -> &[Point] {
        self.blocks[self.block_at(p)].stones()
    }

    pub fn liberties(&self, p: Point) -> &[Point] {
        self.blocks[self.block_at(p)].liberties()
    }

    pub fn is_single_stone(&self, p: Point) -> bool {
        self.num_stones(p) == 1
    }

    pub fn in_atari(&self, p: Point) -> bool {
        self.num_liberties(p) == 1
    }

    /// Like [`in_atari`](Board::in_atari), but false for empty points.
    pub fn occupied_in_atari(&self, p: Point) -> bool {
        self.state.block[p].is_some_and(|b| self.blocks[b].num_liberties() == 1)
    }

    pub fn at_most_num_libs(&self, p: Point, n: usize) -> bool {
        self.num_liberties(p) <= n
    }

    pub fn at_least_num_libs(&self, p: Point, n: usize) -> bool {
        self.num_liberties(p) >= n
    }

    /// The only liberty of a block in atari.
    pub fn the_liberty(&self, p: Point) -> Point {
        let libs = self.liberties(p);
        debug_assert_eq!(libs.len(), 1, "block at {} is not in atari", str_coord(p));
        libs[0]
    }

    pub fn are_in_same_block(&self, p1: Point, p2: Point) -> bool {
        self.state.block[p1].is_some() && self.state.block[p1] == self.state.block[p2]
    }

    /// True if `p` is a stone of the block anchored at `anchor`.
    pub fn is_in_block(&self, p: Point, anchor: Point) -> bool {
        self.state.block[p].is_some_and(|b| self.blocks[b].anchor() == anchor)
    }

    /// True if `p` is a liberty of the block anchored at `anchor`.
    pub fn is_liberty_of_block(&self, p: Point, anchor: Point) -> bool {
        if !self.is_empty(p) {
            return false;
        }
        let b = self.block_at(anchor);
        nb4(p).iter().any(|&nb| self.state.block[nb] == Some(b))
    }

    /// Anchors of opponent blocks adjacent to the block at `p` with at most
    /// `max_lib` liberties.
    pub fn adjacent_blocks(&self, p: Point, max_lib: usize) -> Vec<Point> {
        let b = self.block_at(p);
        let opp = self.blocks[b].color().opponent();
        let mut mark = [false; MAX_POINT];
        let mut result = Vec::new();
        for &stn in self.blocks[b].stones() {
            for nb in nb4(stn) {
                if !self.is_color(nb, opp) {
                    continue;
                }
                let adj = self.block_at(nb);
                let anchor = self.blocks[adj].anchor();
                if !std::mem::replace(&mut mark[anchor], true) && self.blocks[adj].num_liberties() <= max_lib {
                    result.push(anchor);
                }
            }
        }
        result
    }

    /// Anchors of blocks of color `c` next to point `p` with at most
    /// `max_lib` liberties.
    pub fn neighbor_blocks(&self, p: Point, c: Color, max_lib: usize) -> SmallVec<[Point; 4]> {
        self.adjacent_blocks_of(p, c)
            .into_iter()
            .filter(|&b| self.blocks[b].num_liberties() <= max_lib)
            .map(|b| self.blocks[b].anchor())
            .collect()
    }

    // =========================================================================
    // Legality pre-checks
    // =========================================================================

    /// True if `c` playing at empty point `p` would capture something.
    pub fn can_capture(&self, p: Point, c: Color) -> bool {
        let opp = c.opponent();
        nb4(p)
            .iter()
            .any(|&nb| self.is_color(nb, opp) && self.blocks[self.block_at(nb)].num_liberties() == 1)
    }

    /// True if `c` playing at empty point `p` would leave its own block
    /// without liberties.
    pub fn is_suicide(&self, p: Point, c: Color) -> bool {
        if self.has_empty_neighbors(p) {
            return false;
        }
        let opp = c.opponent();
        for nb in nb4(p) {
            match self.state.color[nb].stone() {
                Some(stone) if stone == c && self.num_liberties(nb) > 1 => return false,
                Some(stone) if stone == opp && self.num_liberties(nb) == 1 => return false,
                _ => {}
            }
        }
        true
    }

    /// Would `c` playing at `p` be legal?
    ///
    /// Answers most cases from the current state. Otherwise plays the move,
    /// reads the flag and undoes it, which resets
    /// [`last_move_info`](Board::last_move_info) and
    /// [`captured_stones`](Board::captured_stones).
    pub fn is_legal_move(&mut self, p: Point, c: Color) -> bool {
        if p == PASS {
            return true;
        }
        if !self.is_valid_point(p) || !self.is_empty(p) {
            return false;
        }
        let suicide = self.is_suicide(p, c);
        if suicide && !self.rules.allow_suicide {
            return false;
        }
        let superko = self.rules.ko_rule != crate::rules::KoRule::Simple;
        // A suicide can recreate an earlier position even on a fresh point
        if self.state.is_first[p] && !(suicide && superko) {
            return true;
        }
        if self.state.ko_point == Some(p) && self.state.to_play == c {
            return self.allow_any_repetition;
        }
        if !superko {
            return true;
        }
        if !suicide && self.state.is_new_position && !self.can_capture(p, c) {
            return true;
        }
        match self.play(p, c) {
            Ok(()) => {
                let legal = self.is_legal();
                self.undo_last();
                legal
            }
            Err(_) => false,
        }
    }
}

fn geometry_for(size: usize) -> Result<&'static Geometry, BoardError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(BoardError::InvalidSize(size));
    }
    Ok(Geometry::for_size(size))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        let header: String = (1..=size)
            .map(|c| {
                let s = str_coord(pt(c, 1));
                format!(" {}", &s[..1])
            })
            .collect();
        writeln!(f, "  {header}")?;
        for r in (1..=size).rev() {
            write!(f, "{r:2}")?;
            for c in 1..=size {
                let p = pt(c, r);
                let ch = match self.state.color[p] {
                    BoardColor::Black => 'X',
                    BoardColor::White => 'O',
                    _ => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f, " {r}")?;
        }
        writeln!(f, "  {header}")?;
        write!(
            f,
            "{} to play, captures X {} O {}",
            self.state.to_play, self.state.prisoners[0], self.state.prisoners[1]
        )?;
        if let Some(ko) = self.state.ko_point {
            write!(f, ", ko {}", str_coord(ko))?;
        }
        Ok(())
    }
}
