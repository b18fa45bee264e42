use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stone::Stone;

/// State of a single point on the board.
///
/// `TemporarilyUnplayable` marks a point the player to move may not use
/// (self-capture or positional superko). It is still a liberty, and it is
/// indistinguishable from `Empty` when positions are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intersection {
    Empty,
    Black,
    White,
    TemporarilyUnplayable,
    PermanentlyUnplayable,
}

impl Intersection {
    pub fn counts_as_liberty(self) -> bool {
        matches!(
            self,
            Intersection::Empty | Intersection::TemporarilyUnplayable
        )
    }

    pub fn is_playable(self) -> bool {
        self == Intersection::Empty
    }

    pub fn stone(self) -> Option<Stone> {
        match self {
            Intersection::Black => Some(Stone::Black),
            Intersection::White => Some(Stone::White),
            _ => None,
        }
    }

    /// Two-bit code used in the position fingerprint. Liberty states share 0.
    pub(crate) fn position_code(self) -> u64 {
        match self {
            Intersection::Black => 1,
            Intersection::White => 2,
            Intersection::PermanentlyUnplayable => 3,
            Intersection::Empty | Intersection::TemporarilyUnplayable => 0,
        }
    }
}

impl From<Stone> for Intersection {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Intersection::Black,
            Stone::White => Intersection::White,
        }
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intersection::Empty => write!(f, "Empty"),
            Intersection::Black => write!(f, "Black"),
            Intersection::White => write!(f, "White"),
            Intersection::TemporarilyUnplayable => write!(f, "Temporarily Unplayable"),
            Intersection::PermanentlyUnplayable => write!(f, "Permanently Unplayable"),
        }
    }
}
