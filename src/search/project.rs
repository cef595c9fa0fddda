//! Recursive projection of a small window.

use super::ScoringWeights;
use crate::board::{NEUTRAL, OwnerId};
use crate::combat::{MoveSet, simulate};
use crate::config::SearchConfig;
use crate::error::CoreResult;
use crate::grid::{Coord, Direction, Grid, OwnerStats, Window};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-owner totals after one projected turn.
type Outcome = BTreeMap<OwnerId, OwnerStats>;

/// Result of searching one focal cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Chosen direction for the focal cell.
    pub direction: Direction,
    /// Score of the chosen direction.
    pub score: f64,
    /// Every candidate with its score, in enumeration order.
    pub candidates: Vec<(Direction, f64)>,
    /// Enemy cells that branched.
    pub deciders: Vec<Coord>,
    /// Enemy cells held Still because the branching cap was reached.
    pub held: usize,
    /// Number of simulated turns.
    pub simulations: u64,
}

impl SearchOutcome {
    fn still() -> Self {
        Self {
            direction: Direction::Still,
            score: 0.0,
            candidates: vec![(Direction::Still, 0.0)],
            deciders: Vec::new(),
            held: 0,
            simulations: 0,
        }
    }
}

/// Bounded exhaustive search over enemy responses around one cell.
///
/// Every enemy cell in the window (owner neither neutral nor the focal owner)
/// picks, in turn, the direction that maximizes its own score given the best
/// responses of the deciders after it. The focal cell then picks the
/// direction that maximizes the focal owner's score. Other friendly cells
/// hold Still.
#[derive(Debug, Clone, Copy)]
pub struct LocalSearch {
    window: u16,
    max_deciders: usize,
    weights: ScoringWeights,
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl LocalSearch {
    /// Create a search from its configuration.
    #[must_use]
    pub const fn new(config: &SearchConfig) -> Self {
        Self {
            window: config.window,
            max_deciders: config.max_deciders,
            weights: config.weights,
        }
    }

    /// Search the window centered on `focus` and return the best direction.
    ///
    /// A neutral focus always holds Still. Ties go to the earliest candidate
    /// in [`Direction::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns an error if the window reaches outside `grid` or `focus` is
    /// not in `grid`, or if a projected turn fails to resolve.
    pub fn best_direction(&self, grid: &Grid, focus: Coord) -> CoreResult<SearchOutcome> {
        let window = Window::centered(
            focus,
            self.window,
            grid.source_width(),
            grid.source_height(),
        );
        let local = grid.subgrid(window)?;
        let owner = local.try_cell(focus)?.owner();
        if owner == NEUTRAL {
            return Ok(SearchOutcome::still());
        }

        let mut enemies: Vec<Coord> = local
            .cells()
            .filter(|c| c.is_owned() && c.owner() != owner && c.coord() != focus)
            .map(|c| c.coord())
            .collect();
        enemies.sort_by_key(|&c| (local.distance(focus, c), c));
        let held = enemies.len().saturating_sub(self.max_deciders);
        enemies.truncate(self.max_deciders);

        let mut projection = Projection {
            grid: &local,
            deciders: &enemies,
            weights: self.weights,
            area: window.area(),
            baseline: totals(&local),
            simulations: 0,
        };

        let mut moves = MoveSet::new();
        let mut candidates = Vec::with_capacity(Direction::ALL.len());
        let mut best: Option<(Direction, f64)> = None;
        for direction in feasible(&local, focus) {
            moves.insert(focus, direction);
            let outcome = projection.project(&mut moves, 0)?;
            let score = projection.score(owner, &outcome);
            candidates.push((direction, score));
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((direction, score));
            }
        }
        let (direction, score) = best.unwrap_or((Direction::Still, 0.0));
        let simulations = projection.simulations;

        tracing::debug!(
            x = focus.x,
            y = focus.y,
            owner,
            ?direction,
            score,
            deciders = enemies.len(),
            held,
            simulations,
            "searched window"
        );
        Ok(SearchOutcome {
            direction,
            score,
            candidates,
            deciders: enemies,
            held,
            simulations,
        })
    }
}

struct Projection<'a> {
    grid: &'a Grid,
    deciders: &'a [Coord],
    weights: ScoringWeights,
    area: u32,
    baseline: Outcome,
    simulations: u64,
}

impl Projection<'_> {
    fn score(&self, owner: OwnerId, outcome: &Outcome) -> f64 {
        let before = self.baseline.get(&owner).copied().unwrap_or_default();
        let after = outcome.get(&owner).copied().unwrap_or_default();
        self.weights.score(before, after, self.area)
    }

    /// Resolve deciders from `depth` on and return the turn they lead to.
    fn project(&mut self, moves: &mut MoveSet, depth: usize) -> CoreResult<Outcome> {
        let Some(&decider) = self.deciders.get(depth) else {
            self.simulations += 1;
            return Ok(totals(&simulate(self.grid, moves)?));
        };
        let owner = self.grid.try_cell(decider)?.owner();

        let mut best: Option<(f64, Outcome)> = None;
        for direction in feasible(self.grid, decider) {
            moves.insert(decider, direction);
            let outcome = self.project(moves, depth + 1)?;
            let score = self.score(owner, &outcome);
            if best.as_ref().is_none_or(|(top, _)| score > *top) {
                best = Some((score, outcome));
            }
        }
        moves.remove(decider);
        Ok(best.map(|(_, outcome)| outcome).unwrap_or_default())
    }
}

/// Directions from `coord` whose destination stays in the window.
fn feasible(grid: &Grid, coord: Coord) -> impl Iterator<Item = Direction> + '_ {
    Direction::ALL
        .into_iter()
        .filter(move |&d| grid.contains(grid.location(coord, d)))
}

fn totals(grid: &Grid) -> Outcome {
    grid.owners().map(|o| (o.owner(), o.stats())).collect()
}
