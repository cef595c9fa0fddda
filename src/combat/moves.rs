//! Moves and move sets.

use crate::error::CoreResult;
use crate::grid::{Coord, Direction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One cell's order for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The cell being ordered.
    pub coord: Coord,
    /// Where it moves.
    pub direction: Direction,
}

impl Move {
    /// Create a new move.
    #[must_use]
    pub const fn new(coord: Coord, direction: Direction) -> Self {
        Self { coord, direction }
    }
}

/// At most one direction per cell. Cells without an entry hold Still.
///
/// Iterates in row-major coordinate order and serializes as a list of
/// [`Move`]s. When a list names a cell twice the later entry wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Move>", into = "Vec<Move>")]
pub struct MoveSet {
    moves: BTreeMap<Coord, Direction>,
}

impl MoveSet {
    /// Create an empty move set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a move list from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Order `coord` to move in `direction`, replacing any earlier order.
    pub fn insert(&mut self, coord: Coord, direction: Direction) -> Option<Direction> {
        self.moves.insert(coord, direction)
    }

    /// Remove the order for `coord`.
    pub fn remove(&mut self, coord: Coord) -> Option<Direction> {
        self.moves.remove(&coord)
    }

    /// Direction ordered for `coord`, Still if none.
    #[must_use]
    pub fn direction(&self, coord: Coord) -> Direction {
        self.moves.get(&coord).copied().unwrap_or_default()
    }

    /// Number of explicit orders, Still orders included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True if no cell has an explicit order.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Every explicit order in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().map(|(&coord, &direction)| Move::new(coord, direction))
    }
}

impl FromIterator<Move> for MoveSet {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Move> for MoveSet {
    fn extend<I: IntoIterator<Item = Move>>(&mut self, iter: I) {
        for m in iter {
            self.insert(m.coord, m.direction);
        }
    }
}

impl From<Vec<Move>> for MoveSet {
    fn from(moves: Vec<Move>) -> Self {
        moves.into_iter().collect()
    }
}

impl From<MoveSet> for Vec<Move> {
    fn from(set: MoveSet) -> Self {
        set.iter().collect()
    }
}
