use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GoError;
use crate::stone::Stone;

/// Where a game stands. `Invalidated`, `Win` and `Draw` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Outcome {
    InProgress,
    CompleteButNotScored,
    Invalidated,
    Win {
        winner: Stone,
        margin: f64,
        black_score: f64,
        black_points_on_board: f64,
        white_score: f64,
        white_points_on_board: f64,
    },
    Draw {
        score: f64,
        black_points_on_board: f64,
        white_points_on_board: f64,
    },
}

impl Outcome {
    /// Final result from the area each player holds and the compensation
    /// adjustment, which is taken from Black and given to White.
    pub(crate) fn from_points(
        black_points_on_board: f64,
        white_points_on_board: f64,
        adjustment: f64,
    ) -> Self {
        let black_score = black_points_on_board - adjustment;
        let white_score = white_points_on_board + adjustment;
        let difference = black_score - white_score;

        if difference == 0.0 {
            Outcome::Draw {
                score: black_score,
                black_points_on_board,
                white_points_on_board,
            }
        } else {
            Outcome::Win {
                winner: if difference > 0.0 {
                    Stone::Black
                } else {
                    Stone::White
                },
                margin: difference.abs(),
                black_score,
                black_points_on_board,
                white_score,
                white_points_on_board,
            }
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress | Outcome::CompleteButNotScored)
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, Outcome::Win { .. } | Outcome::Draw { .. })
    }

    pub fn winner(&self) -> Result<Stone, GoError> {
        match self {
            Outcome::Win { winner, .. } => Ok(*winner),
            Outcome::Draw { .. } => Err(GoError::state("a drawn game has no winner")),
            other => Err(other.unscored()),
        }
    }

    pub fn margin(&self) -> Result<f64, GoError> {
        match self {
            Outcome::Win { margin, .. } => Ok(*margin),
            Outcome::Draw { .. } => Ok(0.0),
            other => Err(other.unscored()),
        }
    }

    pub fn black_score(&self) -> Result<f64, GoError> {
        match self {
            Outcome::Win { black_score, .. } => Ok(*black_score),
            Outcome::Draw { score, .. } => Ok(*score),
            other => Err(other.unscored()),
        }
    }

    pub fn white_score(&self) -> Result<f64, GoError> {
        match self {
            Outcome::Win { white_score, .. } => Ok(*white_score),
            Outcome::Draw { score, .. } => Ok(*score),
            other => Err(other.unscored()),
        }
    }

    pub fn black_points_on_board(&self) -> Result<f64, GoError> {
        match self {
            Outcome::Win {
                black_points_on_board,
                ..
            }
            | Outcome::Draw {
                black_points_on_board,
                ..
            } => Ok(*black_points_on_board),
            other => Err(other.unscored()),
        }
    }

    pub fn white_points_on_board(&self) -> Result<f64, GoError> {
        match self {
            Outcome::Win {
                white_points_on_board,
                ..
            }
            | Outcome::Draw {
                white_points_on_board,
                ..
            } => Ok(*white_points_on_board),
            other => Err(other.unscored()),
        }
    }

    fn unscored(&self) -> GoError {
        GoError::state(format!("a game that is {self} has no score"))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "IN PROGRESS"),
            Outcome::CompleteButNotScored => write!(f, "COMPLETE BUT NOT SCORED"),
            Outcome::Invalidated => write!(f, "INVALIDATED"),
            Outcome::Win {
                winner,
                margin,
                black_score,
                black_points_on_board,
                white_score,
                white_points_on_board,
            } => write!(
                f,
                "WON by {winner} by {margin:.2} {{ Black has {black_score:.2} with \
                 {black_points_on_board:.2} on board; White has {white_score:.2} with \
                 {white_points_on_board:.2} on board }}"
            ),
            Outcome::Draw {
                score,
                black_points_on_board,
                white_points_on_board,
            } => write!(
                f,
                "ENDED IN DRAW {{ Black has {score:.2} with {black_points_on_board:.2} on \
                 board; White has {score:.2} with {white_points_on_board:.2} on board }}"
            ),
        }
    }
}
