use std::fmt;
use std::hash::{Hash, Hasher};

use crate::Point;
use crate::error::GoError;
use crate::intersection::Intersection;
use crate::point::{self, MAX_DIMENSION, Points};

const BITS_PER_POINT: usize = 2;

// The top bit of every word stays clear. Packing a point into it once made
// distinct positions compare equal.
const POINTS_PER_WORD: usize = (u64::BITS as usize - 1) / BITS_PER_POINT;

const MAX_POINTS: usize = MAX_DIMENSION as usize * MAX_DIMENSION as usize;
const FINGERPRINT_WORDS: usize = MAX_POINTS.div_ceil(POINTS_PER_WORD);

/// Packed stone arrangement, two bits per point.
///
/// `Empty` and `TemporarilyUnplayable` share a code, so two boards that only
/// differ in unplayable markings have the same fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint([u64; FINGERPRINT_WORDS]);

impl Fingerprint {
    fn write(&mut self, index: usize, code: u64) {
        let word = index / POINTS_PER_WORD;
        let offset = (index % POINTS_PER_WORD) * BITS_PER_POINT;
        self.0[word] = (self.0[word] & !(0b11 << offset)) | (code << offset);
    }
}

/// A square board of fixed dimension.
///
/// The per-point states, the fingerprint and the count of non-liberty points
/// are always updated together.
#[derive(Debug, Clone)]
pub struct Board {
    dimension: u8,
    intersections: Vec<Intersection>,
    position: Fingerprint,
    non_liberty: usize,
}

impl Board {
    pub fn new(dimension: u8) -> Result<Self, GoError> {
        point::validate_dimension(dimension)?;
        Ok(Self::blank(dimension))
    }

    /// Empty board for a dimension already known to be valid.
    pub(crate) fn blank(dimension: u8) -> Self {
        let size = dimension as usize * dimension as usize;
        Board {
            dimension,
            intersections: vec![Intersection::Empty; size],
            position: Fingerprint::default(),
            non_liberty: 0,
        }
    }

    // -- Accessors --

    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    pub fn points(&self) -> Points {
        Points::within(self.dimension)
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.position
    }

    pub fn get(&self, point: Point) -> Result<Intersection, GoError> {
        self.validate(point)?;
        Ok(self.at(point))
    }

    pub fn set(&mut self, point: Point, intersection: Intersection) -> Result<(), GoError> {
        self.validate(point)?;
        self.put(point, intersection);
        Ok(())
    }

    /// Compares stone arrangements only; unplayable markings are ignored.
    pub fn is_same_position_as(&self, other: &Board) -> bool {
        self.dimension == other.dimension && self.position == other.position
    }

    /// Number of points that are not liberties (stones and permanently unplayable points).
    pub fn count_non_empty_intersections(&self) -> usize {
        self.non_liberty
    }

    pub fn is_empty(&self) -> bool {
        self.non_liberty == 0
    }

    // -- Internal helpers --

    fn validate(&self, point: Point) -> Result<(), GoError> {
        if point.is_within(self.dimension) {
            Ok(())
        } else {
            Err(GoError::argument(format!(
                "point {point} is not on a {0}x{0} board",
                self.dimension
            )))
        }
    }

    /// Unchecked read for points already known to be on the board.
    #[inline]
    pub(crate) fn at(&self, point: Point) -> Intersection {
        self.intersections[point.index(self.dimension)]
    }

    /// Unchecked write for points already known to be on the board.
    pub(crate) fn put(&mut self, point: Point, intersection: Intersection) {
        let index = point.index(self.dimension);
        let previous = self.intersections[index];

        if !previous.counts_as_liberty() {
            self.non_liberty -= 1;
        }
        if !intersection.counts_as_liberty() {
            self.non_liberty += 1;
        }
        self.position.write(index, intersection.position_code());
        self.intersections[index] = intersection;
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension && self.intersections == other.intersections
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension.hash(state);
        self.intersections.hash(state);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dimension as usize;
        if d == 1 && self.intersections[0] == Intersection::Empty {
            return writeln!(f, "∙");
        }

        for (i, value) in self.intersections.iter().enumerate() {
            let (column, row) = (i % d, i / d);
            let glyph = match value {
                Intersection::Empty => match (row, column) {
                    (0, 0) => '┌',
                    (0, c) if c == d - 1 => '┐',
                    (r, 0) if r == d - 1 => '└',
                    (r, c) if r == d - 1 && c == d - 1 => '┘',
                    (0, _) => '┬',
                    (r, _) if r == d - 1 => '┴',
                    (_, 0) => '├',
                    (_, c) if c == d - 1 => '┤',
                    _ => '┼',
                },
                Intersection::Black => '●',
                Intersection::White => '○',
                Intersection::TemporarilyUnplayable => '∙',
                Intersection::PermanentlyUnplayable => 'X',
            };
            write!(f, "{glyph}")?;
            if column == d - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
impl Board {
    /// Build a board from an ASCII layout.
    /// 'B' = Black, 'W' = White, '*' = temporarily unplayable, 'X' = permanently unplayable, '+' = Empty.
    pub(crate) fn from_layout(layout: &[&str]) -> Board {
        let mut board = Board::new(layout.len() as u8).unwrap();
        for (row, line) in layout.iter().enumerate() {
            assert_eq!(line.len(), layout.len(), "malformed board layout");
            for (column, c) in line.chars().enumerate() {
                let value = match c {
                    'B' => Intersection::Black,
                    'W' => Intersection::White,
                    '*' => Intersection::TemporarilyUnplayable,
                    'X' => Intersection::PermanentlyUnplayable,
                    _ => Intersection::Empty,
                };
                let point = Point::new(column as u8 + 1, row as u8 + 1).unwrap();
                board.set(point, value).unwrap();
            }
        }
        board
    }
}
