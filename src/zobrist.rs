//! Zobrist keys for incremental position hashing.
//!
//! Each (color, point) pair has a random 64-bit key; the hash of a position
//! is the XOR of the keys of all stones on the board, so placing or removing
//! a stone is a single XOR and the empty board hashes to zero. One extra key
//! distinguishes the side to move when a caller needs a situational hash.
//!
//! Keys are generated once per process from a fixed seed, so hashes are
//! reproducible across runs.

use std::sync::OnceLock;

use crate::constants::{MAX_POINT, ZOBRIST_SEED};
use crate::point::{Color, Point};

/// Incremental position fingerprint.
pub type HashCode = u64;

pub struct ZobristTable {
    stones: [[u64; MAX_POINT]; 2],
    white_to_play: u64,
}

static TABLE: OnceLock<ZobristTable> = OnceLock::new();

impl ZobristTable {
    /// The process-wide key table.
    pub fn global() -> &'static ZobristTable {
        TABLE.get_or_init(|| ZobristTable::with_seed(ZOBRIST_SEED))
    }

    fn with_seed(seed: u64) -> ZobristTable {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut stones = [[0u64; MAX_POINT]; 2];
        for keys in stones.iter_mut() {
            for k in keys.iter_mut() {
                // Zero would make a stone invisible to the hash
                *k = loop {
                    let v = rng.u64(..);
                    if v != 0 {
                        break v;
                    }
                };
            }
        }
        ZobristTable {
            stones,
            white_to_play: rng.u64(1..),
        }
    }

    /// Key of a stone of color `c` at `p`.
    #[inline]
    pub fn stone(&self, p: Point, c: Color) -> HashCode {
        self.stones[c.index()][p]
    }

    /// Key mixed into the hash when White is to play.
    #[inline]
    pub fn to_play(&self, c: Color) -> HashCode {
        match c {
            Color::Black => 0,
            Color::White => self.white_to_play,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::pt;

    #[test]
    fn test_keys_are_distinct() {
        let t = ZobristTable::global();
        let p = pt(4, 4);
        assert_ne!(t.stone(p, Color::Black), t.stone(p, Color::White));
        assert_ne!(t.stone(p, Color::Black), t.stone(pt(4, 5), Color::Black));
        assert_ne!(t.to_play(Color::White), 0);
    }

    #[test]
    fn test_reproducible() {
        let a = ZobristTable::with_seed(ZOBRIST_SEED);
        let t = ZobristTable::global();
        assert_eq!(a.stone(pt(3, 7), Color::White), t.stone(pt(3, 7), Color::White));
    }

    #[test]
    fn test_xor_is_incremental() {
        let t = ZobristTable::global();
        let mut h: HashCode = 0;
        h ^= t.stone(pt(1, 1), Color::Black);
        h ^= t.stone(pt(2, 2), Color::White);
        h ^= t.stone(pt(1, 1), Color::Black);
        assert_eq!(h, t.stone(pt(2, 2), Color::White));
    }
}
