use std::fmt;

use serde_repr::{Deserialize_repr, Serialize_repr};

/// A player, identified with the colour of their stones. Serialized as `1`
/// for Black and `-1` for White.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Stone {
    Black = 1,
    White = -1,
}

impl Stone {
    pub const ALL: [Stone; 2] = [Stone::Black, Stone::White];

    /// Black opens an even game; White answers a handicap.
    pub fn first_to_move(handicap_stones: usize) -> Self {
        if handicap_stones == 0 {
            Stone::Black
        } else {
            Stone::White
        }
    }

    pub fn opp(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stone::Black => "Black",
            Stone::White => "White",
        })
    }
}
