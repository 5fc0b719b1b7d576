//! Rule settings that affect move legality.

use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

/// Which position repetitions make a move illegal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum KoRule {
    /// Only the immediate recapture of a single-stone ko is forbidden.
    Simple,
    /// A full-board position may not repeat, regardless of who is to play.
    PositionalSuperko,
    /// A full-board position may not repeat with the same side to play.
    #[default]
    SituationalSuperko,
}

impl fmt::Display for KoRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KoRule::Simple => write!(f, "simple"),
            KoRule::PositionalSuperko => write!(f, "positional_superko"),
            KoRule::SituationalSuperko => write!(f, "superko"),
        }
    }
}

impl FromStr for KoRule {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(KoRule::Simple),
            "positional_superko" => Ok(KoRule::PositionalSuperko),
            "superko" | "situational_superko" => Ok(KoRule::SituationalSuperko),
            _ => Err(BoardError::UnknownRules(s.to_string())),
        }
    }
}

/// Rules a board enforces. Chosen once per game and handed to the board at
/// construction or reset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rules {
    /// If false, a move that leaves its own block without liberties is
    /// flagged illegal. Either way the block is removed from the board.
    pub allow_suicide: bool,
    pub ko_rule: KoRule,
}

impl Rules {
    pub fn new(allow_suicide: bool, ko_rule: KoRule) -> Self {
        Self {
            allow_suicide,
            ko_rule,
        }
    }
}

/// Named rule sets: `cgos`, `chinese`, `kgs` (positional superko) and
/// `japanese` (simple ko). None of them allows suicide.
impl FromStr for Rules {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cgos" | "chinese" | "kgs" => Ok(Rules::new(false, KoRule::PositionalSuperko)),
            "japanese" => Ok(Rules::new(false, KoRule::Simple)),
            _ => Err(BoardError::UnknownRules(s.to_string())),
        }
    }
}
