//! Grid cells and their cached derived state.

use super::Coord;
use crate::board::{NEUTRAL, OwnerId, Site};
use std::cell::OnceCell;

/// What a cell sees of one cardinal neighbour: `(owner, strength)`.
pub(crate) type NeighborView = Option<(OwnerId, u8)>;

/// Derived state computed from the cell and its in-window neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Derived {
    /// True if any in-window cardinal neighbour has a different owner.
    pub(crate) border: bool,
    /// Snapshot of each cardinal neighbour, `None` outside the window.
    pub(crate) neighbors: [NeighborView; 4],
}

impl Derived {
    pub(crate) fn new(owner: OwnerId, neighbors: [NeighborView; 4]) -> Self {
        let border = neighbors.iter().flatten().any(|&(o, _)| o != owner);
        Self { border, neighbors }
    }
}

/// One square of a [`Grid`](super::Grid).
///
/// Owner, strength and production are copied from the board. Border status
/// and damage are derived lazily through the owning grid and memoized until
/// [`Cell::invalidate`] or [`Cell::update`] clears them.
#[derive(Debug, Clone)]
pub struct Cell {
    coord: Coord,
    site: Site,
    derived: OnceCell<Derived>,
}

impl Cell {
    /// Create a cell at an absolute coordinate.
    #[must_use]
    pub const fn new(coord: Coord, site: Site) -> Self {
        Self {
            coord,
            site,
            derived: OnceCell::new(),
        }
    }

    /// Absolute coordinate on the source torus.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Current owner.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.site.owner
    }

    /// Current strength.
    #[must_use]
    pub const fn strength(&self) -> u8 {
        self.site.strength
    }

    /// Per-turn production.
    #[must_use]
    pub const fn production(&self) -> u8 {
        self.site.production
    }

    /// Owner, strength and production as a board site.
    #[must_use]
    pub const fn site(&self) -> Site {
        self.site
    }

    /// True if the cell has a non-neutral owner.
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        self.site.owner != NEUTRAL
    }

    /// Overwrite the cell's contents and drop its cached state.
    pub fn update(&mut self, site: Site) {
        self.site = site;
        self.invalidate();
    }

    /// Drop the cached border and damage state.
    pub fn invalidate(&mut self) {
        self.derived.take();
    }

    /// True if border and damage state are currently cached.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        self.derived.get().is_some()
    }

    pub(crate) fn cached(&self) -> Option<&Derived> {
        self.derived.get()
    }

    pub(crate) fn derived_or_init(&self, init: impl FnOnce() -> Derived) -> &Derived {
        self.derived.get_or_init(init)
    }

    pub(crate) fn set_owner(&mut self, owner: OwnerId, strength: u8) {
        self.site.owner = owner;
        self.site.strength = strength;
    }

    pub(crate) fn set_strength(&mut self, strength: u8) {
        self.site.strength = strength;
    }
}

/// Damage an `owner` would face taking a cell: its strength plus every
/// non-neutral foreign neighbour.
pub(crate) fn total_damage(strength: u8, derived: &Derived, owner: OwnerId) -> u32 {
    derived
        .neighbors
        .iter()
        .flatten()
        .filter(|&&(o, _)| o != NEUTRAL && o != owner)
        .fold(u32::from(strength), |acc, &(_, s)| acc + u32::from(s))
}
