//! Reinforcement demand behind each border attack.

use super::{Cost, FlowField, Sense, cost_of, propagate};
use crate::board::OwnerId;
use crate::grid::{Coord, Direction, Grid};
use std::collections::BTreeMap;

/// Strength still needed to win each border cell's best attack, carried
/// inward.
///
/// Every border cell picks the foreign neighbour with the highest
/// [`Grid::heuristic`] (first one on ties) and needs that target's total
/// damage minus its own strength. The need flows into friendly territory,
/// each cell on the way covering part of it with its own strength.
/// Magnitudes read as outstanding need; border seeds point at their target.
#[must_use]
pub fn support_field(grid: &Grid, owner: OwnerId) -> FlowField {
    let mut targets: BTreeMap<Coord, (Direction, Cost)> = BTreeMap::new();
    let mut seeds = Vec::new();
    for &coord in grid.border_cells(owner) {
        let Some(cell) = grid.cell(coord) else {
            continue;
        };
        let mut best: Option<(Direction, Coord, f64)> = None;
        for (direction, other) in grid.neighbors(coord) {
            if other.owner() == owner {
                continue;
            }
            let value = grid.heuristic(other.coord(), owner);
            if best.is_none_or(|(_, _, v)| value > v) {
                best = Some((direction, other.coord(), value));
            }
        }
        if let Some((direction, target, _)) = best {
            let need = (cost_of(grid.total_damage(target, owner)) - Cost::from(cell.strength())).max(0);
            targets.insert(coord, (direction, need));
            seeds.push(coord);
        }
    }

    let mut field = propagate(grid, &seeds, Sense::Remaining, |via, cell, field| {
        let Some(via) = via else {
            return targets.get(&cell.coord()).map(|&(_, need)| -need);
        };
        if cell.owner() != owner {
            return None;
        }
        let need = -field.cost(via.coord())?;
        (need > 0).then(|| -(need - Cost::from(cell.strength())).max(0))
    });

    for (coord, (direction, _)) in targets {
        if field.distance(coord) == Some(0) {
            field.set_direction(coord, direction);
        }
    }
    field
}
