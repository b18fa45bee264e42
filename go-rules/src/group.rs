use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use crate::Point;
use crate::board::Board;
use crate::error::GoError;
use crate::intersection::Intersection;

/// A maximal connected region grown from one point.
///
/// Stones join a group of their own colour. `Empty` and
/// `TemporarilyUnplayable` points join one another, so an empty region is a
/// single group regardless of unplayable markings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Group {
    kind: Intersection,
    members: BTreeSet<Point>,
    liberties: usize,
    borders_black: bool,
    borders_white: bool,
}

impl Group {
    pub fn new(board: &Board, start: Point) -> Result<Self, GoError> {
        board.get(start)?;
        Ok(Self::flood(board, start))
    }

    /// Breadth-first flood fill. Every point is queued at most once, so each
    /// adjacent liberty is counted once.
    pub(crate) fn flood(board: &Board, start: Point) -> Self {
        let dimension = board.dimension();
        let kind = board.at(start);

        let mut queued = vec![false; dimension as usize * dimension as usize];
        let mut to_visit = VecDeque::from([start]);
        queued[start.index(dimension)] = true;

        let mut members = BTreeSet::new();
        let mut liberties = 0;
        let mut borders_black = false;
        let mut borders_white = false;

        while let Some(current) = to_visit.pop_front() {
            let value = board.at(current);
            if value == kind || (kind.counts_as_liberty() && value.counts_as_liberty()) {
                members.insert(current);
                for n in current.adjacent(dimension) {
                    let ni = n.index(dimension);
                    if !queued[ni] {
                        queued[ni] = true;
                        to_visit.push_back(n);
                    }
                }
            } else if value.counts_as_liberty() {
                liberties += 1;
            } else if value == Intersection::Black {
                borders_black = true;
            } else if value == Intersection::White {
                borders_white = true;
            }
        }

        let kind = match kind {
            Intersection::TemporarilyUnplayable => Intersection::Empty,
            other => other,
        };

        Group {
            kind,
            members,
            liberties,
            borders_black,
            borders_white,
        }
    }

    /// `Black`, `White`, `Empty` (also for unplayable-marked regions) or `PermanentlyUnplayable`.
    pub fn kind(&self) -> Intersection {
        self.kind
    }

    pub fn members(&self) -> &BTreeSet<Point> {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.members.contains(&point)
    }

    /// Distinct liberty points adjacent to a stone group.
    pub fn liberties(&self) -> usize {
        self.liberties
    }

    pub fn borders_black(&self) -> bool {
        self.borders_black
    }

    pub fn borders_white(&self) -> bool {
        self.borders_white
    }

    pub fn is_stones(&self) -> bool {
        self.kind.stone().is_some()
    }
}

/// Groups covering the board, each found once, in the order of their first point.
/// With `stones_only`, empty and unplayable regions are skipped.
pub(crate) fn partition(board: &Board, stones_only: bool) -> Vec<Group> {
    let dimension = board.dimension();
    let mut grouped = vec![false; dimension as usize * dimension as usize];
    let mut groups = Vec::new();

    for point in board.points() {
        if grouped[point.index(dimension)] {
            continue;
        }
        if stones_only && board.at(point).stone().is_none() {
            continue;
        }
        let group = Group::flood(board, point);
        for member in &group.members {
            grouped[member.index(dimension)] = true;
        }
        groups.push(group);
    }

    groups
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group{{ {} {}", self.members.len(), self.kind)?;
        match self.kind {
            Intersection::Empty => match (self.borders_black, self.borders_white) {
                (true, true) => write!(f, " bordering Black and White")?,
                (true, false) => write!(f, " bordering Black")?,
                (false, true) => write!(f, " bordering White")?,
                (false, false) => {}
            },
            Intersection::PermanentlyUnplayable => {}
            _ => write!(f, " with {} liberties", self.liberties)?,
        }
        write!(f, ", [")?;
        for (i, p) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, "] }}")
    }
}
