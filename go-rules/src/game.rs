use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::board::Board;
use crate::error::GoError;
use crate::group::{self, Group};
use crate::handicap;
use crate::intersection::Intersection;
use crate::outcome::Outcome;
use crate::point::{self, MAX_DIMENSION};
use crate::scoring;
use crate::stone::Stone;
use crate::superko::PositionHistory;
use crate::turn::Move;

pub const DEFAULT_COMPENSATION: f64 = 7.5;

/// Captures indexed by stone color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }
}

/// Settings for a new game. Every setter validates eagerly and leaves the
/// builder unchanged when it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct GameBuilder {
    dimension: u8,
    compensation: f64,
    handicap_stones: BTreeSet<Point>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        GameBuilder {
            dimension: MAX_DIMENSION,
            compensation: DEFAULT_COMPENSATION,
            handicap_stones: BTreeSet::new(),
        }
    }
}

impl GameBuilder {
    pub fn new(dimension: u8) -> Result<Self, GoError> {
        point::validate_dimension(dimension)?;
        Ok(GameBuilder {
            dimension,
            ..Self::default()
        })
    }

    // -- Accessors --

    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    pub fn compensation(&self) -> f64 {
        self.compensation
    }

    pub fn handicap_stones(&self) -> &BTreeSet<Point> {
        &self.handicap_stones
    }

    pub fn count_handicap_stones(&self) -> usize {
        self.handicap_stones.len()
    }

    // -- Settings --

    pub fn set_compensation(&mut self, compensation: f64) -> Result<&mut Self, GoError> {
        if !compensation.is_finite() || (compensation * 4.0).fract() != 0.0 {
            return Err(GoError::argument(format!(
                "compensation must be a finite multiple of 0.25, got {compensation}"
            )));
        }
        self.compensation = compensation;
        Ok(self)
    }

    pub fn add_handicap_stone(&mut self, point: Point) -> Result<&mut Self, GoError> {
        if self.handicap_stones.contains(&point) {
            return Ok(self);
        }
        self.validate_handicap_stone(point)?;
        if self.handicap_stones.len() + 1 > self.max_handicap_stones() {
            return Err(GoError::state(format!(
                "a {0}x{0} game allows at most {1} handicap stones",
                self.dimension,
                self.max_handicap_stones()
            )));
        }
        self.handicap_stones.insert(point);
        Ok(self)
    }

    pub fn remove_handicap_stone(&mut self, point: Point) -> Result<&mut Self, GoError> {
        self.validate_handicap_stone(point)?;
        self.handicap_stones.remove(&point);
        Ok(self)
    }

    pub fn clear_handicap_stones(&mut self) -> &mut Self {
        self.handicap_stones.clear();
        self
    }

    pub fn set_handicap_stones<I>(&mut self, stones: I) -> Result<&mut Self, GoError>
    where
        I: IntoIterator<Item = Point>,
    {
        let stones: BTreeSet<Point> = stones.into_iter().collect();
        for &point in &stones {
            self.validate_handicap_stone(point)?;
        }
        if stones.len() > self.max_handicap_stones() {
            return Err(GoError::state(format!(
                "a {0}x{0} game allows at most {1} handicap stones, got {2}",
                self.dimension,
                self.max_handicap_stones(),
                stones.len()
            )));
        }
        self.handicap_stones = stones;
        Ok(self)
    }

    /// Replace the handicap with the traditional star-point placement.
    pub fn place_standard_handicap(&mut self, count: u8) -> Result<&mut Self, GoError> {
        let stones = handicap::require_standard_placements(self.dimension, count)?;
        self.set_handicap_stones(stones)
    }

    pub fn build(&self) -> Game {
        Game::start(
            self.dimension,
            self.compensation,
            self.handicap_stones.clone(),
        )
    }

    // -- Internal helpers --

    fn max_handicap_stones(&self) -> usize {
        self.dimension as usize * self.dimension as usize - 1
    }

    fn validate_handicap_stone(&self, point: Point) -> Result<(), GoError> {
        if !point.is_within(self.dimension) {
            return Err(GoError::argument(format!(
                "handicap stone {point} is not on a {0}x{0} board",
                self.dimension
            )));
        }
        if self.dimension == 1 {
            return Err(GoError::state("a 1x1 game cannot have handicap stones"));
        }
        Ok(())
    }
}

/// One immutable position in a game's history.
///
/// A `Game` is a cheap handle; cloning it shares the node. `play`, `pass`,
/// `score` and `invalidate` return new nodes that point back at this one, so
/// any number of branches can grow from the same ancestor.
#[derive(Clone)]
pub struct Game {
    node: Arc<Node>,
}

struct Node {
    board: Board,
    compensation: f64,
    handicap_stones: Arc<BTreeSet<Point>>,
    captures: Captures,
    current_player: Option<Stone>,
    moves_played: u32,
    previous_move: Option<Move>,
    outcome: Outcome,
    previous: Option<Game>,
    history: PositionHistory,
}

impl Drop for Node {
    // Unlink the history chain iteratively; long games would otherwise
    // recurse once per move.
    fn drop(&mut self) {
        let mut previous = self.previous.take();
        while let Some(game) = previous {
            previous = match Arc::into_inner(game.node) {
                Some(mut node) => node.previous.take(),
                None => None,
            };
        }
    }
}

impl Game {
    pub fn builder(dimension: u8) -> Result<GameBuilder, GoError> {
        GameBuilder::new(dimension)
    }

    pub fn new<I>(dimension: u8, compensation: f64, handicap_stones: I) -> Result<Game, GoError>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut builder = GameBuilder::new(dimension)?;
        builder
            .set_compensation(compensation)?
            .set_handicap_stones(handicap_stones)?;
        Ok(builder.build())
    }

    fn start(dimension: u8, compensation: f64, handicap_stones: BTreeSet<Point>) -> Game {
        let mut board = Board::blank(dimension);
        for &point in &handicap_stones {
            board.put(point, Intersection::Black);
        }

        let current_player = Stone::first_to_move(handicap_stones.len());

        let history = PositionHistory::new(dimension);
        if dimension == 1 {
            for point in board.points() {
                board.put(point, Intersection::PermanentlyUnplayable);
            }
        } else {
            board = prepare_for(&board, current_player, &history);
        }
        let history = history.record(&board);

        tracing::debug!(
            "new {dimension}x{dimension} game, compensation {compensation}, {} handicap stones",
            handicap_stones.len()
        );

        Game {
            node: Arc::new(Node {
                board,
                compensation,
                handicap_stones: Arc::new(handicap_stones),
                captures: Captures::new(),
                current_player: Some(current_player),
                moves_played: 0,
                previous_move: None,
                outcome: Outcome::InProgress,
                previous: None,
                history,
            }),
        }
    }

    // -- Accessors --

    pub fn board(&self) -> &Board {
        &self.node.board
    }

    pub fn get(&self, point: Point) -> Result<Intersection, GoError> {
        self.node.board.get(point)
    }

    pub fn dimension(&self) -> u8 {
        self.node.board.dimension()
    }

    pub fn compensation(&self) -> f64 {
        self.node.compensation
    }

    pub fn captures(&self) -> &Captures {
        &self.node.captures
    }

    pub fn captures_for(&self, stone: Stone) -> u32 {
        self.node.captures.get(stone)
    }

    pub fn handicap(&self) -> usize {
        self.node.handicap_stones.len()
    }

    pub fn handicap_stones(&self) -> &BTreeSet<Point> {
        &self.node.handicap_stones
    }

    pub fn moves_played(&self) -> u32 {
        self.node.moves_played
    }

    pub fn outcome(&self) -> &Outcome {
        &self.node.outcome
    }

    pub fn is_over(&self) -> bool {
        self.node.outcome.is_over()
    }

    /// Whether a pass now would end play.
    pub fn would_pass_end_game(&self) -> bool {
        self.node.outcome == Outcome::InProgress && self.node.previous_move == Some(Move::Pass)
    }

    pub fn current_player(&self) -> Result<Stone, GoError> {
        match (self.node.outcome, self.node.current_player) {
            (Outcome::InProgress, Some(player)) => Ok(player),
            (outcome, _) => Err(GoError::state(format!(
                "a game that is {outcome} has no player to move"
            ))),
        }
    }

    pub fn previous_move(&self) -> Result<Move, GoError> {
        self.node
            .previous_move
            .ok_or_else(|| GoError::state("the initial position has no previous move"))
    }

    pub fn previous_state(&self) -> Result<&Game, GoError> {
        self.node
            .previous
            .as_ref()
            .ok_or_else(|| GoError::state("the initial position has no previous state"))
    }

    /// Every `Empty` point plus `Pass` while in progress; nothing otherwise.
    pub fn legal_moves(&self) -> HashSet<Move> {
        let mut moves = HashSet::new();
        if self.node.outcome == Outcome::InProgress {
            let board = &self.node.board;
            moves.extend(
                board
                    .points()
                    .filter(|&p| board.at(p).is_playable())
                    .map(Move::Play),
            );
            moves.insert(Move::Pass);
        }
        moves
    }

    pub fn groups_of_stones(&self) -> HashSet<Group> {
        group::partition(&self.node.board, true).into_iter().collect()
    }

    pub fn all_groups(&self) -> HashSet<Group> {
        group::partition(&self.node.board, false).into_iter().collect()
    }

    /// The group containing `point`, e.g. to mark it dead before scoring.
    pub fn group_at(&self, point: Point) -> Result<Group, GoError> {
        Group::new(&self.node.board, point)
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(a: &Game, b: &Game) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }

    // -- Game actions --

    pub fn play(&self, mv: Move) -> Result<Game, GoError> {
        self.require_in_progress()?;
        match mv {
            Move::Pass => self.pass(),
            Move::Play(point) => {
                let board = &self.node.board;
                if !point.is_within(board.dimension()) || !board.at(point).is_playable() {
                    return Err(GoError::argument(format!(
                        "{point} is not a playable point on this {0}x{0} board",
                        board.dimension()
                    )));
                }
                self.place(point)
            }
        }
    }

    pub fn pass(&self) -> Result<Game, GoError> {
        let player = self.require_in_progress()?;

        if self.node.previous_move == Some(Move::Pass) {
            tracing::debug!("{player} passed after a pass; play is complete");
            return Ok(self.advance(
                Move::Pass,
                player,
                0,
                self.node.board.clone(),
                Outcome::CompleteButNotScored,
            ));
        }

        tracing::debug!("{player} passed on move {}", self.node.moves_played + 1);
        let board = prepare_for(&self.node.board, player.opp(), &self.node.history);
        Ok(self.advance(Move::Pass, player, 0, board, Outcome::InProgress))
    }

    /// Remove the dead groups and count the area.
    pub fn score<'a, I>(&self, dead_groups: I) -> Result<Game, GoError>
    where
        I: IntoIterator<Item = &'a Group>,
    {
        if self.node.outcome != Outcome::CompleteButNotScored {
            return Err(GoError::state(format!(
                "only a game that is {} can be scored; this one is {}",
                Outcome::CompleteButNotScored,
                self.node.outcome
            )));
        }

        let dead: HashSet<&Group> = dead_groups.into_iter().collect();
        if !dead.is_empty() {
            let actual = self.all_groups();
            for group in &dead {
                if !actual.contains(*group) {
                    return Err(GoError::argument(format!(
                        "{group} does not exist on this board"
                    )));
                }
                if !group.is_stones() {
                    return Err(GoError::argument(format!(
                        "only Black or White groups can be dead, got {group}"
                    )));
                }
            }
        }

        let mut clean = self.node.board.clone();
        let mut captures = self.node.captures.clone();
        for group in &dead {
            if let Some(stone) = group.kind().stone() {
                captures.add(stone.opp(), group.len() as u32);
            }
            for &point in group.members() {
                clean.put(point, Intersection::Empty);
            }
        }
        for point in clean.points() {
            if clean.at(point) == Intersection::TemporarilyUnplayable {
                clean.put(point, Intersection::Empty);
            }
        }

        let area = scoring::count_area(&clean);
        let adjustment = (self.node.compensation + self.handicap() as f64) / 2.0;
        let outcome = Outcome::from_points(area.black, area.white, adjustment);
        tracing::debug!(
            "scored with {} dead groups: Black {} on board, White {} on board; {outcome}",
            dead.len(),
            area.black,
            area.white
        );

        Ok(self.conclude(clean, captures, outcome))
    }

    pub fn invalidate(&self) -> Result<Game, GoError> {
        if self.node.outcome != Outcome::InProgress {
            return Err(GoError::state(format!(
                "only a game in progress can be invalidated; this one is {}",
                self.node.outcome
            )));
        }
        tracing::debug!("invalidated after {} moves", self.node.moves_played);
        Ok(self.conclude(
            self.node.board.clone(),
            self.node.captures.clone(),
            Outcome::Invalidated,
        ))
    }

    /// The last position in progress before the two passes that ended play.
    pub fn resume(&self) -> Result<Game, GoError> {
        if self.node.outcome != Outcome::CompleteButNotScored {
            return Err(GoError::state(format!(
                "only a game that is {} can be resumed; this one is {}",
                Outcome::CompleteButNotScored,
                self.node.outcome
            )));
        }
        let before_passes = self
            .node
            .previous
            .as_ref()
            .and_then(|first_pass| first_pass.node.previous.as_ref())
            .ok_or_else(|| GoError::state("no position precedes the final passes"))?;
        tracing::debug!("resumed at move {}", before_passes.node.moves_played);
        Ok(before_passes.clone())
    }

    // -- Internal helpers --

    fn require_in_progress(&self) -> Result<Stone, GoError> {
        match (self.node.outcome, self.node.current_player) {
            (Outcome::InProgress, Some(player)) => Ok(player),
            (outcome, _) => Err(GoError::state(format!(
                "a game that is {outcome} accepts no further moves"
            ))),
        }
    }

    fn place(&self, point: Point) -> Result<Game, GoError> {
        let player = self.require_in_progress()?;

        let mut board = self.node.board.clone();
        board.put(point, player.into());
        let captured = remove_captures(&mut board, point, player);
        tracing::debug!(
            "move {}: {player} played {point}, capturing {captured}",
            self.node.moves_played + 1
        );

        let board = prepare_for(&board, player.opp(), &self.node.history);
        Ok(self.advance(Move::Play(point), player, captured, board, Outcome::InProgress))
    }

    /// Append a node for a move by `mover`.
    fn advance(
        &self,
        mv: Move,
        mover: Stone,
        captured: u32,
        board: Board,
        outcome: Outcome,
    ) -> Game {
        let mut captures = self.node.captures.clone();
        captures.add(mover, captured);
        let current_player = match outcome {
            Outcome::InProgress => Some(mover.opp()),
            _ => None,
        };
        let history = self.node.history.record(&board);

        Game {
            node: Arc::new(Node {
                board,
                compensation: self.node.compensation,
                handicap_stones: Arc::clone(&self.node.handicap_stones),
                captures,
                current_player,
                moves_played: self.node.moves_played + 1,
                previous_move: Some(mv),
                outcome,
                previous: Some(self.clone()),
                history,
            }),
        }
    }

    /// Append a terminal node that records no move.
    fn conclude(&self, board: Board, captures: Captures, outcome: Outcome) -> Game {
        Game {
            node: Arc::new(Node {
                board,
                compensation: self.node.compensation,
                handicap_stones: Arc::clone(&self.node.handicap_stones),
                captures,
                current_player: None,
                moves_played: self.node.moves_played,
                previous_move: self.node.previous_move,
                outcome,
                previous: Some(self.clone()),
                history: self.node.history.clone(),
            }),
        }
    }
}

/// Remove every opposing group left without liberties next to `around`.
/// Returns the number of stones removed.
fn remove_captures(board: &mut Board, around: Point, played_by: Stone) -> u32 {
    let opponent = Intersection::from(played_by.opp());
    let mut captured = 0;

    for n in around.adjacent(board.dimension()) {
        if board.at(n) != opponent {
            continue;
        }
        let group = Group::flood(board, n);
        if group.liberties() == 0 {
            captured += group.len() as u32;
            for &point in group.members() {
                board.put(point, Intersection::Empty);
            }
        }
    }

    captured
}

/// Mark every liberty point `Empty` or `TemporarilyUnplayable` for `player`.
///
/// Each point is tried on a scratch copy: a placement that captures nothing
/// and leaves its own group without liberties is self-capture, and any other
/// placement that recreates a recorded position violates superko. The whole
/// board is swept every time.
fn prepare_for(board: &Board, player: Stone, history: &PositionHistory) -> Board {
    let mut next = board.clone();
    let mut self_captures = 0;
    let mut repetitions = 0;

    for point in board.points() {
        if !board.at(point).counts_as_liberty() {
            continue;
        }

        let mut scratch = board.clone();
        scratch.put(point, player.into());
        let captured = remove_captures(&mut scratch, point, player);

        let value = if captured == 0 && Group::flood(&scratch, point).liberties() == 0 {
            self_captures += 1;
            Intersection::TemporarilyUnplayable
        } else if history.contains(&scratch) {
            repetitions += 1;
            Intersection::TemporarilyUnplayable
        } else {
            Intersection::Empty
        };
        next.put(point, value);
    }

    tracing::trace!(
        "{player} to move: {self_captures} self-capture points, {repetitions} superko points"
    );
    next
}

impl Node {
    fn same_state(&self, other: &Node) -> bool {
        self.board == other.board
            && self.compensation == other.compensation
            && self.handicap_stones == other.handicap_stones
            && self.captures == other.captures
            && self.current_player == other.current_player
            && self.moves_played == other.moves_played
            && self.previous_move == other.previous_move
            && self.outcome == other.outcome
    }
}

impl PartialEq for Game {
    // Walks both histories side by side until they meet at a shared node.
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self, other);
        loop {
            if Game::ptr_eq(a, b) {
                return true;
            }
            if !a.node.same_state(&b.node) {
                return false;
            }
            match (&a.node.previous, &b.node.previous) {
                (Some(pa), Some(pb)) => (a, b) = (pa, pb),
                (None, None) => return true,
                _ => return false,
            }
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("dimension", &self.dimension())
            .field("outcome", &self.node.outcome)
            .field("moves_played", &self.node.moves_played)
            .field("current_player", &self.node.current_player)
            .field("previous_move", &self.node.previous_move)
            .field("captures", &self.node.captures)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.node;
        let d = self.dimension();
        write!(f, "{d}x{d} Game {}, {} Moves", node.outcome, node.moves_played)?;
        if let Ok(player) = self.current_player() {
            write!(f, ", {player} to Play")?;
        }
        write!(
            f,
            "\nCompensation {}, Handicap {}",
            node.compensation,
            node.handicap_stones.len()
        )?;
        for stone in node.handicap_stones.iter() {
            write!(f, " {stone}")?;
        }
        write!(
            f,
            "\nBlack Captures {}, White Captures {}",
            node.captures.black, node.captures.white
        )?;
        if let Some(mv) = node.previous_move {
            write!(f, "\nPrevious Move @ {mv}")?;
        }
        write!(f, "\n{}", node.board)
    }
}

#[cfg(test)]
impl Game {
    /// Start from an arbitrary position with `to_move` to play.
    pub(crate) fn from_position(board: Board, to_move: Stone, compensation: f64) -> Game {
        let history = PositionHistory::new(board.dimension());
        let board = prepare_for(&board, to_move, &history);
        let history = history.record(&board);
        Game {
            node: Arc::new(Node {
                board,
                compensation,
                handicap_stones: Arc::default(),
                captures: Captures::new(),
                current_player: Some(to_move),
                moves_played: 0,
                previous_move: None,
                outcome: Outcome::InProgress,
                previous: None,
                history,
            }),
        }
    }
}
