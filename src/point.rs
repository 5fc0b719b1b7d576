//! Points, stone colors, and coordinate conversion.
//!
//! A [`Point`] is an index into the fixed per-point arrays described in
//! [`constants`](crate::constants). `pt(col, row)` builds one from 1-based
//! grid coordinates, with row 1 at the bottom of the board as in the usual
//! text notation ("A1" is the lower left corner).

use std::fmt;

use crate::constants::{MAX_POINT, MAX_SIZE, NS, NULL_MOVE, PASS, RESIGN};
use crate::error::BoardError;

/// A point on the board, represented as an index into the per-point arrays.
pub type Point = usize;

/// Color of a stone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    #[default]
    Black,
    White,
}

impl Color {
    /// Both stone colors, black first.
    pub const BOTH: [Color; 2] = [Color::Black, Color::White];

    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Index for per-color arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Content of a point: a stone, nothing, or the off-board border.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoardColor {
    Empty,
    Black,
    White,
    Border,
}

impl BoardColor {
    /// The stone color, if the point holds a stone.
    #[inline]
    pub fn stone(self) -> Option<Color> {
        match self {
            BoardColor::Black => Some(Color::Black),
            BoardColor::White => Some(Color::White),
            BoardColor::Empty | BoardColor::Border => None,
        }
    }
}

impl From<Color> for BoardColor {
    #[inline]
    fn from(c: Color) -> Self {
        match c {
            Color::Black => BoardColor::Black,
            Color::White => BoardColor::White,
        }
    }
}

/// Point at 1-based column `col` and row `row`.
#[inline]
pub const fn pt(col: usize, row: usize) -> Point {
    NS * row + col
}

/// 1-based row of a point (row 1 is the bottom line).
#[inline]
pub const fn row(p: Point) -> usize {
    p / NS
}

/// 1-based column of a point.
#[inline]
pub const fn col(p: Point) -> usize {
    p % NS
}

/// True if `p` lies inside the playable square of the largest board.
/// Whether it is playable on a given board depends on the board size.
#[inline]
pub fn in_board_range(p: Point) -> bool {
    p < MAX_POINT && (1..=MAX_SIZE).contains(&row(p)) && (1..=MAX_SIZE).contains(&col(p))
}

/// Parse a coordinate string (e.g. "D4", "pass") for a board of `size`.
///
/// Columns use the letters A-T with 'I' skipped; rows count from 1 at the
/// bottom. Parsing is case insensitive.
pub fn parse_coord(s: &str, size: usize) -> Result<Point, BoardError> {
    let err = || BoardError::ParseCoord(s.to_string());
    let s = s.trim();
    if s.eq_ignore_ascii_case("pass") {
        return Ok(PASS);
    }
    if s.eq_ignore_ascii_case("resign") {
        return Ok(RESIGN);
    }

    let mut chars = s.chars();
    let letter = chars.next().ok_or_else(err)?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() || letter == 'I' {
        return Err(err());
    }
    let mut c = (letter as u8 - b'A' + 1) as usize;
    // Skip 'I' column (Go convention to avoid confusion with 'J')
    if letter > 'I' {
        c -= 1;
    }

    let r: usize = chars.as_str().parse().map_err(|_| err())?;
    if c > size || r == 0 || r > size {
        return Err(err());
    }
    Ok(pt(c, r))
}

/// Convert a point to a coordinate string (e.g. "D4").
///
/// Sentinels print as "pass", "resign" and "null"; indices outside the
/// playable square print as `#index`.
pub fn str_coord(p: Point) -> String {
    match p {
        PASS => "pass".into(),
        RESIGN => "resign".into(),
        NULL_MOVE => "null".into(),
        _ if !in_board_range(p) => format!("#{p}"),
        _ => {
            // Convert column to letter, skipping 'I'
            let mut c = (b'@' + col(p) as u8) as char;
            if c >= 'I' {
                c = (c as u8 + 1) as char;
            }
            format!("{c}{}", row(p))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pt_row_col() {
        let p = pt(4, 3);
        assert_eq!(col(p), 4);
        assert_eq!(row(p), 3);
        assert!(in_board_range(p));
        assert!(!in_board_range(pt(0, 3)));
        assert!(!in_board_range(pt(3, 0)));
        assert!(!in_board_range(PASS));
    }

    #[test]
    fn test_parse_str_coord_roundtrip() {
        for r in 1..=MAX_SIZE {
            for c in 1..=MAX_SIZE {
                let p = pt(c, r);
                let s = str_coord(p);
                assert_eq!(parse_coord(&s, MAX_SIZE), Ok(p), "roundtrip failed for {s}");
            }
        }
    }

    #[test]
    fn test_parse_coord_skips_i() {
        let h5 = parse_coord("H5", 9).unwrap();
        let j5 = parse_coord("J5", 9).unwrap();
        assert_eq!(j5 - h5, 1, "J should be one column after H");
        assert!(parse_coord("I5", 9).is_err());
    }

    #[test]
    fn test_parse_coord_specials_and_errors() {
        assert_eq!(parse_coord("pass", 9), Ok(PASS));
        assert_eq!(parse_coord("PASS", 9), Ok(PASS));
        assert_eq!(parse_coord("resign", 9), Ok(RESIGN));
        assert!(parse_coord("", 9).is_err());
        assert!(parse_coord("K1", 9).is_err());
        assert!(parse_coord("A10", 9).is_err());
        assert!(parse_coord("A0", 9).is_err());
        assert!(parse_coord("4D", 9).is_err());
    }

    #[test]
    fn test_str_coord() {
        assert_eq!(str_coord(pt(1, 1)), "A1");
        assert_eq!(str_coord(pt(9, 9)), "J9");
        assert_eq!(str_coord(PASS), "pass");
        assert_eq!(str_coord(NULL_MOVE), "null");
        assert_eq!(str_coord(pt(0, 5)), format!("#{}", pt(0, 5)));
    }

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(BoardColor::from(Color::White).stone(), Some(Color::White));
        assert_eq!(BoardColor::Border.stone(), None);
    }
}
