//! Rules of Go: boards, groups, positional superko, area scoring and an
//! immutable game history that can branch at any position.

pub mod board;
pub mod error;
pub mod game;
pub mod group;
pub mod handicap;
pub mod intersection;
pub mod outcome;
pub mod point;
mod scoring;
pub mod stone;
mod superko;
pub mod turn;

pub use board::{Board, Fingerprint};
pub use error::GoError;
pub use game::{Captures, DEFAULT_COMPENSATION, Game, GameBuilder};
pub use group::Group;
pub use intersection::Intersection;
pub use outcome::Outcome;
pub use point::{Direction, MAX_DIMENSION, Point, Points, points};
pub use stone::Stone;
pub use turn::Move;
