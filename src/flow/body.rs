//! Guidance for interior strength towards the part of the frontier that
//! wants it most.

use super::{Cost, FlowField, Sense, propagate};
use crate::board::OwnerId;
use crate::grid::{Coord, Grid};
use std::collections::BTreeMap;

/// What draws interior strength to one stretch of the frontier.
#[derive(Debug, Clone, Copy)]
enum Pull<'a> {
    /// Border cells are discounted by the strength this enemy brings there.
    Threat(&'a FlowField),
    /// Border cells pay their conquest cost to a prospect beyond the nearest.
    Prospect {
        field: &'a FlowField,
        nearest: Cost,
        farthest: Cost,
    },
    Even,
}

/// The border field with its seeds biased towards where strength is needed.
///
/// If any enemy can carry strength into one of the owner's border cells, the
/// enemy reaching furthest sets the bias (lowest owner id on ties): each
/// border seed is discounted by the strength that enemy brings to it.
/// Otherwise each seed is charged how much further it lies from the nearest
/// prospect (see [`prospect_field`](super::prospect_field)) than the closest
/// border cell does. Inside the territory the field grows like
/// [`border_field`](super::border_field).
#[must_use]
pub fn body_field(
    grid: &Grid,
    owner: OwnerId,
    threats: &BTreeMap<OwnerId, FlowField>,
    prospects: &FlowField,
) -> FlowField {
    let borders = grid.border_cells(owner);
    let pull = pull(borders, threats, prospects);
    propagate(grid, borders, Sense::Cost, |via, cell, field| {
        if cell.owner() != owner {
            return None;
        }
        let here = Cost::from(cell.production());
        if let Some(v) = via {
            return field.cost(v.coord()).map(|c| c + here);
        }
        Some(match pull {
            Pull::Threat(threat) => here - threat.magnitude(cell.coord()).unwrap_or(0),
            Pull::Prospect {
                field: prospect,
                nearest,
                farthest,
            } => here + prospect.cost(cell.coord()).unwrap_or(farthest) - nearest,
            Pull::Even => here,
        })
    })
}

fn pull<'a>(
    borders: &[Coord],
    threats: &'a BTreeMap<OwnerId, FlowField>,
    prospects: &'a FlowField,
) -> Pull<'a> {
    let mut top: Option<(&FlowField, i32)> = None;
    for threat in threats.values() {
        for reach in borders.iter().filter_map(|&c| threat.magnitude(c)) {
            if reach > 0 && top.is_none_or(|(_, best)| reach > best) {
                top = Some((threat, reach));
            }
        }
    }
    if let Some((threat, _)) = top {
        return Pull::Threat(threat);
    }

    let costs: Vec<Cost> = borders.iter().filter_map(|&c| prospects.cost(c)).collect();
    match (costs.iter().min(), costs.iter().max()) {
        (Some(&nearest), Some(&farthest)) => Pull::Prospect {
            field: prospects,
            nearest,
            farthest,
        },
        _ => Pull::Even,
    }
}
