//! Precomputed per-size board geometry.
//!
//! A [`Geometry`] answers the size-dependent questions about points: which
//! points are on the board, their orthogonal neighbors, the line they are on
//! (distance from the nearest edge), and whether they lie in a corner, edge
//! or center area. Tables are built once per board size and shared by every
//! board of that size through [`Geometry::for_size`].

use std::sync::OnceLock;

use smallvec::SmallVec;

use crate::constants::{MAX_POINT, MAX_SIZE, MIN_SIZE, NS, WE};
use crate::point::{Point, pt};

/// Area of the board a point belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Area {
    Corner,
    Edge,
    Center,
}

/// Read-only lookup tables for one board size.
pub struct Geometry {
    size: usize,
    on_board: [bool; MAX_POINT],
    line: [u8; MAX_POINT],
    pos: [u8; MAX_POINT],
    area: [Option<Area>; MAX_POINT],
    neighbors: Vec<SmallVec<[Point; 4]>>,
    /// All board points in row-major order, bottom row first.
    points: Vec<Point>,
    /// Points on each line; `lines[0]` is the first line.
    lines: Vec<Vec<Point>>,
    corners: [Point; 4],
}

static CACHE: [OnceLock<Geometry>; MAX_SIZE + 1] = [const { OnceLock::new() }; MAX_SIZE + 1];

impl Geometry {
    /// Shared geometry for boards of `size`, built on first use.
    ///
    /// # Panics
    /// If `size` is outside `MIN_SIZE..=MAX_SIZE`. Callers validate the size
    /// before asking for its geometry.
    pub fn for_size(size: usize) -> &'static Geometry {
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "unsupported board size {size}"
        );
        CACHE[size].get_or_init(|| Geometry::build(size))
    }

    fn build(size: usize) -> Geometry {
        let mut g = Geometry {
            size,
            on_board: [false; MAX_POINT],
            line: [0; MAX_POINT],
            pos: [0; MAX_POINT],
            area: [None; MAX_POINT],
            neighbors: vec![SmallVec::new(); MAX_POINT],
            points: Vec::with_capacity(size * size),
            lines: vec![Vec::new(); size.div_ceil(2)],
            corners: [pt(1, 1), pt(size, 1), pt(1, size), pt(size, size)],
        };

        let half = size.div_ceil(2);
        let max_edge = if size > 11 { 4 } else { 3 };
        for row in 1..=size {
            for col in 1..=size {
                let p = pt(col, row);
                let line_row = if row > half { size + 1 - row } else { row };
                let line_col = if col > half { size + 1 - col } else { col };
                let line = line_row.min(line_col);
                let pos = line_row.max(line_col);
                g.on_board[p] = true;
                g.line[p] = line as u8;
                g.pos[p] = pos as u8;
                g.area[p] = Some(if line > max_edge {
                    Area::Center
                } else if pos <= max_edge + 1 {
                    Area::Corner
                } else {
                    Area::Edge
                });

                let nb = &mut g.neighbors[p];
                if row > 1 {
                    nb.push(p - NS);
                }
                if col > 1 {
                    nb.push(p - WE);
                }
                if col < size {
                    nb.push(p + WE);
                }
                if row < size {
                    nb.push(p + NS);
                }
                g.points.push(p);
                g.lines[line - 1].push(p);
            }
        }
        log::debug!("built geometry for {size}x{size}");
        g
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// True if `p` is a playable point on this board.
    #[inline]
    pub fn is_on_board(&self, p: Point) -> bool {
        p < MAX_POINT && self.on_board[p]
    }

    /// Distance from the nearest edge, 1 for the first line. 0 off-board.
    #[inline]
    pub fn line(&self, p: Point) -> usize {
        self.line[p] as usize
    }

    /// Distance from the nearest edge along the perpendicular direction,
    /// i.e. the larger of the two edge distances. 0 off-board.
    #[inline]
    pub fn pos(&self, p: Point) -> usize {
        self.pos[p] as usize
    }

    #[inline]
    pub fn area(&self, p: Point) -> Option<Area> {
        self.area[p]
    }

    #[inline]
    pub fn in_corner(&self, p: Point) -> bool {
        self.area[p] == Some(Area::Corner)
    }

    #[inline]
    pub fn on_edge(&self, p: Point) -> bool {
        self.area[p] == Some(Area::Edge)
    }

    #[inline]
    pub fn in_center(&self, p: Point) -> bool {
        self.area[p] == Some(Area::Center)
    }

    /// On-board orthogonal neighbors of `p`.
    #[inline]
    pub fn neighbors(&self, p: Point) -> &[Point] {
        &self.neighbors[p]
    }

    /// All playable points, bottom row first, left to right.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Points on `line` (1-based). Empty for lines that do not exist.
    pub fn line_points(&self, line: usize) -> &[Point] {
        match line.checked_sub(1).and_then(|i| self.lines.get(i)) {
            Some(v) => v.as_slice(),
            None => &[],
        }
    }

    #[inline]
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    #[inline]
    pub fn first_board_point(&self) -> Point {
        pt(1, 1)
    }

    #[inline]
    pub fn last_board_point(&self) -> Point {
        pt(self.size, self.size)
    }
}
