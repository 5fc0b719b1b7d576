//! Initial stone placement for loading a position mid-game.
//!
//! A [`Setup`] is plain data: the stones to put on an empty board before the
//! first move and the side to move. Game-record readers produce one; the
//! board only consumes it.

use crate::error::BoardError;
use crate::geometry::Geometry;
use crate::point::{Color, Point, pt, str_coord};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Setup {
    pub black: Vec<Point>,
    pub white: Vec<Point>,
    pub to_play: Color,
}

impl Setup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_black(&mut self, p: Point) -> &mut Self {
        self.black.push(p);
        self
    }

    pub fn add_white(&mut self, p: Point) -> &mut Self {
        self.white.push(p);
        self
    }

    pub fn stones(&self, c: Color) -> &[Point] {
        match c {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// Check that every stone is on a board of `size` and no point is used
    /// twice.
    pub fn validate(&self, geometry: &Geometry) -> Result<(), BoardError> {
        let mut seen = vec![false; crate::constants::MAX_POINT];
        for c in Color::BOTH {
            for &p in self.stones(c) {
                if !geometry.is_on_board(p) {
                    return Err(BoardError::InvalidSetup(format!(
                        "{c} stone {} is off the {}x{} board",
                        str_coord(p),
                        geometry.size(),
                        geometry.size()
                    )));
                }
                if std::mem::replace(&mut seen[p], true) {
                    return Err(BoardError::InvalidSetup(format!(
                        "point {} is set up twice",
                        str_coord(p)
                    )));
                }
            }
        }
        Ok(())
    }

    /// Read a position from a text diagram.
    ///
    /// Each non-blank line is one row, the first line being the top of the
    /// board. `X`, `x` and `@` are black stones, `O`, `o` and `0` white
    /// stones, `.` and `+` empty points; spaces and tabs are ignored. All
    /// rows must have the same length, which is the board size, and there
    /// must be as many rows as columns. Black is to play.
    ///
    /// Returns the setup together with the board size.
    pub fn from_diagram(diagram: &str) -> Result<(Setup, usize), BoardError> {
        let rows: Vec<Vec<Option<Color>>> = diagram
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(parse_row)
            .collect::<Result<_, _>>()?;

        let size = rows.len();
        if !(crate::constants::MIN_SIZE..=crate::constants::MAX_SIZE).contains(&size) {
            return Err(BoardError::ParseDiagram(format!("{size} rows")));
        }
        let mut setup = Setup::new();
        for (i, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(BoardError::ParseDiagram(format!(
                    "row {} has {} points, expected {size}",
                    i + 1,
                    cells.len()
                )));
            }
            let row = size - i;
            for (j, cell) in cells.iter().enumerate() {
                match cell {
                    Some(Color::Black) => {
                        setup.add_black(pt(j + 1, row));
                    }
                    Some(Color::White) => {
                        setup.add_white(pt(j + 1, row));
                    }
                    None => {}
                }
            }
        }
        Ok((setup, size))
    }
}

fn parse_row(line: &str) -> Result<Vec<Option<Color>>, BoardError> {
    line.chars()
        .filter(|c| *c != ' ' && *c != '\t')
        .map(|c| match c {
            'X' | 'x' | '@' => Ok(Some(Color::Black)),
            'O' | 'o' | '0' => Ok(Some(Color::White)),
            '.' | '+' => Ok(None),
            other => Err(BoardError::ParseDiagram(format!("unexpected character {other:?}"))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_diagram() {
        let (setup, size) = Setup::from_diagram(
            "XO..\n\
             .XO.\n\
             ....\n\
             ...O",
        )
        .unwrap();
        assert_eq!(size, 4);
        assert_eq!(setup.black, vec![pt(1, 4), pt(2, 3)]);
        assert_eq!(setup.white, vec![pt(2, 4), pt(3, 3), pt(4, 1)]);
        assert_eq!(setup.to_play, Color::Black);
    }

    #[test]
    fn test_from_diagram_with_spaces() {
        let (setup, size) = Setup::from_diagram("@ 0 .\n. + .\n. . x\n").unwrap();
        assert_eq!(size, 3);
        assert_eq!(setup.black, vec![pt(1, 3), pt(3, 1)]);
        assert_eq!(setup.white, vec![pt(2, 3)]);
    }

    #[test]
    fn test_from_diagram_errors() {
        assert!(matches!(
            Setup::from_diagram("X.\n..."),
            Err(BoardError::ParseDiagram(_))
        ));
        assert!(matches!(
            Setup::from_diagram("X?\n.."),
            Err(BoardError::ParseDiagram(_))
        ));
        assert!(matches!(Setup::from_diagram("X"), Err(BoardError::ParseDiagram(_))));
    }

    #[test]
    fn test_validate() {
        let g = Geometry::for_size(9);
        let mut setup = Setup::new();
        setup.add_black(pt(1, 1)).add_white(pt(2, 1));
        assert!(setup.validate(g).is_ok());
        setup.add_white(pt(1, 1));
        assert!(matches!(setup.validate(g), Err(BoardError::InvalidSetup(_))));

        let mut off = Setup::new();
        off.add_black(pt(10, 1));
        assert!(matches!(off.validate(g), Err(BoardError::InvalidSetup(_))));
    }
}
