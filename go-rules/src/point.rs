use std::cmp::Ordering;
use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::GoError;

/// Largest supported board edge.
pub const MAX_DIMENSION: u8 = 19;

pub(crate) fn validate_dimension(dimension: u8) -> Result<(), GoError> {
    if (1..=MAX_DIMENSION).contains(&dimension) {
        Ok(())
    } else {
        Err(GoError::argument(format!(
            "dimension {dimension} is outside 1..={MAX_DIMENSION}"
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// A board position, 1-based. Row 1 is the top edge, column 1 the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Point {
    column: u8,
    row: u8,
}

impl Point {
    pub fn new(column: u8, row: u8) -> Result<Self, GoError> {
        let valid = 1..=MAX_DIMENSION;
        if valid.contains(&column) && valid.contains(&row) {
            Ok(Point { column, row })
        } else {
            Err(GoError::argument(format!(
                "point ({column}, {row}) is outside 1..={MAX_DIMENSION}"
            )))
        }
    }

    pub fn column(self) -> u8 {
        self.column
    }

    pub fn row(self) -> u8 {
        self.row
    }

    /// Whether the point lies on a board of the given dimension.
    pub fn is_within(self, dimension: u8) -> bool {
        self.column <= dimension && self.row <= dimension
    }

    /// The adjacent point in `direction`, if both it and `self` lie within `dimension`.
    pub fn step(self, direction: Direction, dimension: u8) -> Option<Point> {
        if !self.is_within(dimension) {
            return None;
        }
        let (column, row) = match direction {
            Direction::North => (self.column, self.row - 1),
            Direction::East => (self.column + 1, self.row),
            Direction::South => (self.column, self.row + 1),
            Direction::West => (self.column - 1, self.row),
        };
        if column == 0 || row == 0 || column > dimension || row > dimension {
            None
        } else {
            Some(Point { column, row })
        }
    }

    /// Neighbors under an active dimension. A point outside the dimension has none.
    pub fn neighbors(self, dimension: u8) -> Result<ArrayVec<Point, 4>, GoError> {
        validate_dimension(dimension)?;
        Ok(self.adjacent(dimension))
    }

    pub(crate) fn adjacent(self, dimension: u8) -> ArrayVec<Point, 4> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.step(d, dimension))
            .collect()
    }

    /// Flat row-major index on a board of the given dimension.
    #[inline]
    pub(crate) fn index(self, dimension: u8) -> usize {
        (self.row as usize - 1) * dimension as usize + self.column as usize - 1
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.column).cmp(&(other.row, other.column))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<(u8, u8)> for Point {
    type Error = GoError;

    fn try_from((column, row): (u8, u8)) -> Result<Self, Self::Error> {
        Point::new(column, row)
    }
}

impl From<Point> for (u8, u8) {
    fn from(point: Point) -> Self {
        (point.column, point.row)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Every point of a `dimension`-sized board, row by row.
pub fn points(dimension: u8) -> Result<Points, GoError> {
    validate_dimension(dimension)?;
    Ok(Points::within(dimension))
}

#[derive(Debug, Clone)]
pub struct Points {
    dimension: u8,
    next: usize,
}

impl Points {
    pub(crate) fn within(dimension: u8) -> Self {
        Points { dimension, next: 0 }
    }

    fn total(&self) -> usize {
        self.dimension as usize * self.dimension as usize
    }
}

impl Iterator for Points {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.total() {
            return None;
        }
        let d = self.dimension as usize;
        let point = Point {
            column: (self.next % d) as u8 + 1,
            row: (self.next / d) as u8 + 1,
        };
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Points {}
