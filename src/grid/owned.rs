//! Per-owner aggregates.

use super::Coord;
use crate::board::OwnerId;
use serde::Serialize;
use std::cell::OnceCell;

/// Totals for one owner over a grid window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OwnerStats {
    /// Sum of production over owned cells.
    pub production: u32,
    /// Sum of strength over owned cells.
    pub strength: u32,
    /// Number of owned cells.
    pub territory: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct BorderSplit {
    pub(crate) border: Vec<Coord>,
    pub(crate) body: Vec<Coord>,
}

/// The cells held by one owner, with a lazily computed border/body split.
#[derive(Debug, Clone)]
pub struct OwnedCells {
    owner: OwnerId,
    stats: OwnerStats,
    cells: Vec<Coord>,
    split: OnceCell<BorderSplit>,
}

impl OwnedCells {
    pub(crate) const fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            stats: OwnerStats {
                production: 0,
                strength: 0,
                territory: 0,
            },
            cells: Vec::new(),
            split: OnceCell::new(),
        }
    }

    pub(crate) fn push(&mut self, coord: Coord, strength: u8, production: u8) {
        self.stats.production += u32::from(production);
        self.stats.strength += u32::from(strength);
        self.stats.territory += 1;
        self.cells.push(coord);
    }

    /// The owner these cells belong to.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Aggregate totals.
    #[must_use]
    pub const fn stats(&self) -> OwnerStats {
        self.stats
    }

    /// Every owned cell in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// True once the border/body split has been computed.
    #[must_use]
    pub fn is_split(&self) -> bool {
        self.split.get().is_some()
    }

    pub(crate) fn split_or_init(&self, is_border: impl Fn(Coord) -> bool) -> &BorderSplit {
        self.split.get_or_init(|| {
            let (border, body) = self.cells.iter().copied().partition(|&c| is_border(c));
            BorderSplit { border, body }
        })
    }
}
