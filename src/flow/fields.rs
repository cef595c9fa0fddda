//! The per-turn set of fields a planner reads.

use super::{FlowField, body_field, prospect_field, support_field, threat_fields};
use crate::board::OwnerId;
use crate::grid::{Coord, Grid};
use std::collections::BTreeMap;

/// Every field built for one owner on one turn.
#[derive(Debug, Clone)]
pub struct Fields {
    /// The owner the fields were built for.
    pub owner: OwnerId,
    /// Guidance for interior cells towards the frontier that needs them.
    pub body: FlowField,
    /// Reinforcement demand behind border attacks.
    pub support: FlowField,
    /// Guidance towards the richest cells the owner does not hold.
    pub prospects: FlowField,
    /// Initiative fields of every other player.
    pub threats: BTreeMap<OwnerId, FlowField>,
}

impl Fields {
    /// Build all fields for `owner` from scratch.
    #[must_use]
    pub fn build(grid: &Grid, owner: OwnerId) -> Self {
        let threats = threat_fields(grid, owner);
        let prospects = prospect_field(grid, owner);
        let fields = Self {
            owner,
            body: body_field(grid, owner, &threats, &prospects),
            support: support_field(grid, owner),
            prospects,
            threats,
        };
        tracing::debug!(
            owner,
            body = fields.body.len(),
            support = fields.support.len(),
            prospects = fields.prospects.seeds().len(),
            threats = fields.threats.len(),
            "built fields"
        );
        fields
    }

    /// The enemy whose strength reaches `coord` with the most to spare.
    ///
    /// The lowest owner id wins ties.
    #[must_use]
    pub fn top_threat(&self, coord: Coord) -> Option<(OwnerId, i32)> {
        let mut top: Option<(OwnerId, i32)> = None;
        for (&enemy, field) in &self.threats {
            let Some(strength) = field.magnitude(coord) else {
                continue;
            };
            if top.is_none_or(|(_, best)| strength > best) {
                top = Some((enemy, strength));
            }
        }
        top
    }

    /// True if any enemy could carry strength into `coord`.
    #[must_use]
    pub fn engaged(&self, coord: Coord) -> bool {
        self.top_threat(coord).is_some_and(|(_, strength)| strength > 0)
    }

    /// True if any of `cells` is engaged.
    #[must_use]
    pub fn contested(&self, cells: &[Coord]) -> bool {
        cells.iter().any(|&c| self.engaged(c))
    }
}
