//! The propagation engine and its result type.

use crate::grid::{Cell, Coord, Direction, Grid};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

/// Scalar cost ordering the sweep. Lower costs are explored first.
pub type Cost = i32;

/// Costs at or above this value are unreachable.
pub const MAX_COST: Cost = 10_000;

/// How a field's stored cost reads as a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Magnitude is the cost itself (e.g. production spent).
    Cost,
    /// Magnitude is the negated cost (e.g. strength remaining).
    Remaining,
}

/// Guidance recorded for one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowEntry {
    /// Step to take towards the seed this entry was reached from.
    pub direction: Direction,
    /// Hops from that seed.
    pub distance: u32,
    /// Best cost found.
    pub cost: Cost,
}

/// Result of one sweep, keyed by coordinate.
///
/// Coordinates the sweep never reached have no entry; callers treat that as
/// "no guidance" and fall back to [`Direction::Still`].
#[derive(Debug, Clone)]
pub struct FlowField {
    sense: Sense,
    seeds: Vec<Coord>,
    entries: BTreeMap<Coord, FlowEntry>,
}

impl FlowField {
    /// An empty field.
    #[must_use]
    pub const fn new(sense: Sense) -> Self {
        Self {
            sense,
            seeds: Vec::new(),
            entries: BTreeMap::new(),
        }
    }

    /// How costs read as magnitudes.
    #[must_use]
    pub const fn sense(&self) -> Sense {
        self.sense
    }

    /// Seeds that were accepted, in the order given.
    #[must_use]
    pub fn seeds(&self) -> &[Coord] {
        &self.seeds
    }

    /// Entry for `coord`, if reached.
    #[must_use]
    pub fn entry(&self, coord: Coord) -> Option<&FlowEntry> {
        self.entries.get(&coord)
    }

    /// Direction to follow from `coord`; Still if unreached.
    #[must_use]
    pub fn direction(&self, coord: Coord) -> Direction {
        self.entry(coord).map_or(Direction::Still, |e| e.direction)
    }

    /// Hops from the nearest seed, if reached.
    #[must_use]
    pub fn distance(&self, coord: Coord) -> Option<u32> {
        self.entry(coord).map(|e| e.distance)
    }

    /// Raw cost at `coord`, if reached.
    #[must_use]
    pub fn cost(&self, coord: Coord) -> Option<Cost> {
        self.entry(coord).map(|e| e.cost)
    }

    /// Cost at `coord` read through the field's [`Sense`].
    #[must_use]
    pub fn magnitude(&self, coord: Coord) -> Option<i32> {
        self.cost(coord).map(|c| match self.sense {
            Sense::Cost => c,
            Sense::Remaining => -c,
        })
    }

    /// Number of reached coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was reached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &FlowEntry)> {
        self.entries.iter().map(|(&c, e)| (c, e))
    }

    pub(crate) fn set_direction(&mut self, coord: Coord, direction: Direction) {
        if let Some(entry) = self.entries.get_mut(&coord) {
            entry.direction = direction;
        }
    }

    fn improves(&self, coord: Coord, cost: Cost) -> bool {
        cost < MAX_COST && self.cost(coord).is_none_or(|prev| cost < prev)
    }

    fn record(&mut self, coord: Coord, direction: Direction, distance: u32, cost: Cost) {
        self.entries.insert(
            coord,
            FlowEntry {
                direction,
                distance,
                cost,
            },
        );
    }
}

/// Sweep outward from `seeds`, lowest cost first.
///
/// `cost(via, cell, field)` prices reaching `cell` from the already-resolved
/// `via` (`None` for a seed) and returns `None` when `cell` is unreachable.
/// A neighbour is recorded only when its new cost strictly improves on what
/// it has, with its direction pointing back at `via`. Among equal costs the
/// most recently improved coordinate is expanded first.
///
/// Cost functions must never price a cell below its `via`; every field in
/// this module satisfies that, which keeps expanded entries final.
pub fn propagate<F>(grid: &Grid, seeds: &[Coord], sense: Sense, mut cost: F) -> FlowField
where
    F: FnMut(Option<&Cell>, &Cell, &FlowField) -> Option<Cost>,
{
    let mut field = FlowField::new(sense);
    let mut heap: BinaryHeap<(Reverse<Cost>, u64, Coord)> = BinaryHeap::new();
    let mut seq = 0u64;

    for &coord in seeds {
        let Some(cell) = grid.cell(coord) else {
            continue;
        };
        let Some(c) = cost(None, cell, &field) else {
            continue;
        };
        if !field.improves(coord, c) {
            continue;
        }
        field.record(coord, Direction::Still, 0, c);
        field.seeds.push(coord);
        seq += 1;
        heap.push((Reverse(c), seq, coord));
    }

    let mut expanded = 0usize;
    while let Some((Reverse(c), _, coord)) = heap.pop() {
        // Skip stale entries
        if field.cost(coord) != Some(c) {
            continue;
        }
        let (Some(via), Some(distance)) = (grid.cell(coord), field.distance(coord)) else {
            continue;
        };
        expanded += 1;
        for direction in Direction::CARDINALS {
            let Some(next) = grid.neighbor(coord, direction) else {
                continue;
            };
            let Some(nc) = cost(Some(via), next, &field) else {
                continue;
            };
            if !field.improves(next.coord(), nc) {
                continue;
            }
            field.record(next.coord(), direction.opposite(), distance + 1, nc);
            seq += 1;
            heap.push((Reverse(nc), seq, next.coord()));
        }
    }

    tracing::trace!(
        seeds = field.seeds.len(),
        reached = field.len(),
        expanded,
        "propagated flow field"
    );
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Site};

    fn uniform(width: u16, height: u16) -> Grid {
        Grid::from_board(&Board::filled(width, height, Site::new(0, 1, 1)).unwrap()).unwrap()
    }

    fn hop_cost(via: Option<&Cell>, _cell: &Cell, field: &FlowField) -> Option<Cost> {
        match via {
            None => Some(0),
            Some(v) => field.cost(v.coord()).map(|c| c + 1),
        }
    }

    #[test]
    fn test_single_seed_distances_wrap() {
        let grid = uniform(5, 5);
        let field = propagate(&grid, &[Coord::new(0, 0)], Sense::Cost, hop_cost);
        assert_eq!(field.len(), 25);
        assert_eq!(field.distance(Coord::new(0, 0)), Some(0));
        assert_eq!(field.direction(Coord::new(0, 0)), Direction::Still);
        assert_eq!(field.distance(Coord::new(4, 0)), Some(1));
        assert_eq!(field.direction(Coord::new(4, 0)), Direction::East);
        assert_eq!(field.direction(Coord::new(0, 1)), Direction::North);
        assert_eq!(field.distance(Coord::new(2, 2)), Some(4));
    }

    #[test]
    fn test_unreachable_cells_have_no_entry() {
        let grid = uniform(4, 1);
        let field = propagate(&grid, &[Coord::new(0, 0)], Sense::Cost, |via, cell, f| {
            if cell.coord() == Coord::new(2, 0) {
                return None;
            }
            hop_cost(via, cell, f)
        });
        assert!(field.entry(Coord::new(2, 0)).is_none());
        assert_eq!(field.direction(Coord::new(2, 0)), Direction::Still);
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn test_max_cost_is_unreachable() {
        let grid = uniform(3, 1);
        let field = propagate(&grid, &[Coord::new(0, 0)], Sense::Cost, |via, _, _| {
            Some(if via.is_none() { 0 } else { MAX_COST })
        });
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_costlier_seed_is_overridden() {
        let grid = uniform(3, 1);
        let seeds = [Coord::new(0, 0), Coord::new(1, 0)];
        let field = propagate(&grid, &seeds, Sense::Cost, |via, cell, f| match via {
            None if cell.coord() == Coord::new(1, 0) => Some(50),
            None => Some(0),
            Some(v) => f.cost(v.coord()).map(|c| c + 1),
        });
        assert_eq!(field.seeds(), &seeds);
        assert_eq!(field.cost(Coord::new(1, 0)), Some(1));
        assert_eq!(field.direction(Coord::new(1, 0)), Direction::West);
        assert_eq!(field.distance(Coord::new(1, 0)), Some(1));
    }

    #[test]
    fn test_equal_costs_expand_latest_first() {
        // Two seeds at equal cost; the later one claims the shared neighbour.
        let grid = uniform(3, 1);
        let seeds = [Coord::new(0, 0), Coord::new(2, 0)];
        let field = propagate(&grid, &seeds, Sense::Cost, hop_cost);
        assert_eq!(field.direction(Coord::new(1, 0)), Direction::East);
    }

    #[test]
    fn test_remaining_sense_negates() {
        let grid = uniform(2, 1);
        let field = propagate(&grid, &[Coord::new(0, 0)], Sense::Remaining, |via, _, f| {
            match via {
                None => Some(-9),
                Some(v) => f.cost(v.coord()).map(|c| c + 4),
            }
        });
        assert_eq!(field.magnitude(Coord::new(0, 0)), Some(9));
        assert_eq!(field.magnitude(Coord::new(1, 0)), Some(5));
        assert_eq!(field.cost(Coord::new(1, 0)), Some(-5));
    }

    #[test]
    fn test_seed_outside_window_is_skipped() {
        let board = Board::filled(6, 6, Site::new(0, 1, 1)).unwrap();
        let window = crate::grid::Window {
            origin: Coord::new(0, 0),
            width: 2,
            height: 2,
        };
        let grid = Grid::build(window, &board).unwrap();
        let field = propagate(&grid, &[Coord::new(4, 4)], Sense::Cost, hop_cost);
        assert!(field.is_empty());
        assert!(field.seeds().is_empty());
    }
}
