//! Fields that price reaching chosen target cells.

use super::{Cost, FlowField, Sense, propagate};
use crate::board::OwnerId;
use crate::grid::{Cell, Coord, Grid};

/// Cumulative production along the cheapest path to any of `targets`.
#[must_use]
pub fn production_field(grid: &Grid, targets: &[Coord]) -> FlowField {
    cumulative(grid, targets, |cell| Cost::from(cell.production()))
}

/// Cumulative production to the window's most productive cells.
///
/// A flat production map makes every cell a target, giving a zero-distance
/// field everywhere.
#[must_use]
pub fn attraction_field(grid: &Grid) -> FlowField {
    production_field(grid, &grid.highest_production_cells())
}

/// Cumulative strength that must be overcome to reach any of `targets`.
#[must_use]
pub fn conquest_field(grid: &Grid, targets: &[Coord]) -> FlowField {
    cumulative(grid, targets, |cell| Cost::from(cell.strength()))
}

/// Cumulative strength to the window's most productive cells that `owner`
/// does not hold.
///
/// Empty once the owner holds every one of them.
#[must_use]
pub fn prospect_field(grid: &Grid, owner: OwnerId) -> FlowField {
    let targets: Vec<Coord> = grid
        .highest_production_cells()
        .into_iter()
        .filter(|&c| grid.cell(c).is_some_and(|cell| cell.owner() != owner))
        .collect();
    conquest_field(grid, &targets)
}

fn cumulative(grid: &Grid, targets: &[Coord], price: impl Fn(&Cell) -> Cost) -> FlowField {
    propagate(grid, targets, Sense::Cost, |via, cell, field| match via {
        None => Some(price(cell)),
        Some(v) => field.cost(v.coord()).map(|c| c + price(cell)),
    })
}
