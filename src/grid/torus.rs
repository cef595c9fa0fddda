//! The grid: a window of cells over a toroidal board.

use super::cell::{Derived, NeighborView, total_damage};
use super::owned::BorderSplit;
use super::{Cell, Coord, Direction, OwnedCells, OwnerStats, Window};
use crate::board::{Board, NEUTRAL, OwnerId, Site};
use crate::error::{CoreError, CoreResult};
use std::collections::BTreeMap;

/// Minimum, maximum and mean production over a grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProductionRange {
    /// Lowest production of any cell.
    pub min: u8,
    /// Highest production of any cell.
    pub max: u8,
    /// Mean production.
    pub mean: f64,
}

/// A rectangular window of [`Cell`]s over a torus.
///
/// Neighbour lookups wrap against the dimensions of the source torus, not
/// the window, so a window may reference coordinates it does not hold.
/// Cells outside the window are unknown: a cell on the window edge has
/// fewer than four neighbours, and its border state and damage only count
/// the ones inside. A full-board grid sees every distinct neighbour.
/// Per-owner aggregates are rebuilt whenever cell contents change.
#[derive(Debug, Clone)]
pub struct Grid {
    source_width: u16,
    source_height: u16,
    window: Window,
    cells: Vec<Cell>,
    owners: BTreeMap<OwnerId, OwnedCells>,
}

impl Grid {
    /// Build a grid over `window` of `board`.
    ///
    /// # Errors
    ///
    /// Returns an error if the window has a zero dimension or is larger
    /// than the board.
    pub fn build(window: Window, board: &Board) -> CoreResult<Self> {
        Self::from_sites(window, board.width(), board.height(), |coord| {
            board
                .get(coord)
                .copied()
                .ok_or(CoreError::OutsideWindow { coord })
        })
    }

    /// Build a grid covering the whole board.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty.
    pub fn from_board(board: &Board) -> CoreResult<Self> {
        Self::build(Window::full(board.width(), board.height()), board)
    }

    /// Build a grid over `window` of this grid's torus, copying cells from
    /// this grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is invalid or reaches cells this grid
    /// does not hold.
    pub fn subgrid(&self, window: Window) -> CoreResult<Self> {
        Self::from_sites(window, self.source_width, self.source_height, |coord| {
            self.try_cell(coord).map(Cell::site)
        })
    }

    fn from_sites(
        window: Window,
        source_width: u16,
        source_height: u16,
        mut site_at: impl FnMut(Coord) -> CoreResult<Site>,
    ) -> CoreResult<Self> {
        if window.width == 0 || window.height == 0 {
            return Err(CoreError::InvalidDimensions {
                width: window.width,
                height: window.height,
            });
        }
        if window.width > source_width || window.height > source_height {
            return Err(CoreError::WindowTooLarge {
                width: window.width,
                height: window.height,
                source_width,
                source_height,
            });
        }
        let window = Window {
            origin: window.origin.offset(0, 0, source_width, source_height),
            ..window
        };

        let mut cells = Vec::with_capacity(usize::from(window.width) * usize::from(window.height));
        for ly in 0..window.height {
            for lx in 0..window.width {
                let coord = window.absolute(lx, ly, source_width, source_height);
                cells.push(Cell::new(coord, site_at(coord)?));
            }
        }

        let mut grid = Self {
            source_width,
            source_height,
            window,
            cells,
            owners: BTreeMap::new(),
        };
        grid.rebuild_owners();
        tracing::trace!(
            origin_x = window.origin.x,
            origin_y = window.origin.y,
            width = window.width,
            height = window.height,
            owners = grid.owners.len(),
            "built grid"
        );
        Ok(grid)
    }

    /// Overwrite every cell from a fresh board snapshot, in place.
    ///
    /// Cell coordinates are kept; cached state and owner aggregates are
    /// rebuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if the board's dimensions differ from the torus
    /// this grid was built over.
    pub fn update(&mut self, board: &Board) -> CoreResult<()> {
        if board.width() != self.source_width || board.height() != self.source_height {
            return Err(CoreError::BoardMismatch {
                width: self.source_width,
                height: self.source_height,
                actual_width: board.width(),
                actual_height: board.height(),
            });
        }
        for cell in &mut self.cells {
            let coord = cell.coord();
            let site = board
                .get(coord)
                .copied()
                .ok_or(CoreError::OutsideWindow { coord })?;
            cell.update(site);
        }
        self.reset();
        Ok(())
    }

    /// Drop every cached border/damage value and rebuild owner aggregates.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.invalidate();
        }
        self.rebuild_owners();
    }

    fn rebuild_owners(&mut self) {
        let mut owners: BTreeMap<OwnerId, OwnedCells> = BTreeMap::new();
        for cell in &self.cells {
            owners
                .entry(cell.owner())
                .or_insert_with(|| OwnedCells::new(cell.owner()))
                .push(cell.coord(), cell.strength(), cell.production());
        }
        self.owners = owners;
    }

    /// Width of the source torus.
    #[must_use]
    pub const fn source_width(&self) -> u16 {
        self.source_width
    }

    /// Height of the source torus.
    #[must_use]
    pub const fn source_height(&self) -> u16 {
        self.source_height
    }

    /// The window this grid holds.
    #[must_use]
    pub const fn window(&self) -> Window {
        self.window
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        let (lx, ly) = self
            .window
            .local(coord, self.source_width, self.source_height)?;
        Some(usize::from(ly) * usize::from(self.window.width) + usize::from(lx))
    }

    /// True if `coord` lies inside the window.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Cell at `coord`, if inside the window.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).and_then(|i| self.cells.get(i))
    }

    /// Cell at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutsideWindow`] if `coord` is not inside the window.
    pub fn try_cell(&self, coord: Coord) -> CoreResult<&Cell> {
        self.cell(coord).ok_or(CoreError::OutsideWindow { coord })
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.index(coord).and_then(|i| self.cells.get_mut(i))
    }

    /// All cells in window row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// The coordinate one step from `coord`, wrapped on the source torus.
    #[must_use]
    pub fn location(&self, coord: Coord, direction: Direction) -> Coord {
        coord.step(direction, self.source_width, self.source_height)
    }

    /// The cell one step from `coord`, if that cell is inside the window.
    #[must_use]
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<&Cell> {
        self.cell(self.location(coord, direction))
    }

    /// In-window cardinal neighbours of `coord`, each location once.
    ///
    /// On a torus one or two cells across, several directions land on the
    /// same location or on `coord` itself. Only the first direction reaching
    /// a new location is kept.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, &Cell)> {
        self.distinct_neighbors(coord).into_iter().flatten()
    }

    fn distinct_neighbors(&self, coord: Coord) -> [Option<(Direction, &Cell)>; 4] {
        let mut slots: [Option<(Direction, &Cell)>; 4] = [None; 4];
        for (i, direction) in Direction::CARDINALS.into_iter().enumerate() {
            let at = self.location(coord, direction);
            let seen = at == coord || slots[..i].iter().flatten().any(|(_, c)| c.coord() == at);
            if !seen {
                slots[i] = self.cell(at).map(|c| (direction, c));
            }
        }
        slots
    }

    /// `(owner, strength)` of each distinct in-window neighbour, in
    /// [`Direction::CARDINALS`] order.
    pub(crate) fn neighbor_views(&self, coord: Coord) -> [NeighborView; 4] {
        self.distinct_neighbors(coord)
            .map(|slot| slot.map(|(_, n)| (n.owner(), n.strength())))
    }

    fn derived(&self, coord: Coord) -> Option<(&Cell, &Derived)> {
        let cell = self.cell(coord)?;
        let derived = cell.derived_or_init(|| Derived::new(cell.owner(), self.neighbor_views(coord)));
        Some((cell, derived))
    }

    /// True if any in-window neighbour of `coord` has a different owner.
    #[must_use]
    pub fn is_border(&self, coord: Coord) -> bool {
        self.derived(coord).is_some_and(|(_, d)| d.border)
    }

    /// Strength of the cell at `coord` plus the strength of every neighbour
    /// held by a player other than `owner`.
    #[must_use]
    pub fn total_damage(&self, coord: Coord, owner: OwnerId) -> u32 {
        self.derived(coord)
            .map_or(0, |(cell, d)| total_damage(cell.strength(), d, owner))
    }

    /// Attack value of `coord` for `owner`.
    ///
    /// Neutral cells with strength are valued by production per strength;
    /// anything else by [`Grid::total_damage`].
    #[must_use]
    pub fn heuristic(&self, coord: Coord, owner: OwnerId) -> f64 {
        match self.cell(coord) {
            Some(cell) if cell.owner() == NEUTRAL && cell.strength() > 0 => {
                f64::from(cell.production()) / f64::from(cell.strength())
            }
            Some(_) => f64::from(self.total_damage(coord, owner)),
            None => 0.0,
        }
    }

    /// Damage dealt minus strength lost if `owner` attacks `coord` with
    /// `strength`.
    ///
    /// Every foreign non-neutral neighbour of the target is hit as well, so
    /// a positive value means the attack trades favourably.
    #[must_use]
    pub fn overkill(&self, coord: Coord, owner: OwnerId, strength: u8) -> i32 {
        let Some(target) = self.cell(coord) else {
            return 0;
        };
        let attack = i32::from(strength);
        let mut taken = 0;
        let mut lost = 0;
        if target.owner() != owner {
            taken += attack.min(i32::from(target.strength()));
            lost += i32::from(target.strength());
        }
        for (_, n) in self.neighbors(coord) {
            if n.is_owned() && n.owner() != owner {
                taken += attack.min(i32::from(n.strength()));
                lost += i32::from(n.strength());
            }
        }
        taken - attack.min(lost)
    }

    /// Aggregates for every owner present, neutral included, by owner id.
    pub fn owners(&self) -> impl Iterator<Item = &OwnedCells> {
        self.owners.values()
    }

    /// Non-neutral owners present in the window.
    pub fn players(&self) -> impl Iterator<Item = OwnerId> + '_ {
        self.owners.keys().copied().filter(|&o| o != NEUTRAL)
    }

    /// Cells held by `owner`, if it holds any.
    #[must_use]
    pub fn owned(&self, owner: OwnerId) -> Option<&OwnedCells> {
        self.owners.get(&owner)
    }

    /// Totals for `owner`; zero if it holds nothing.
    #[must_use]
    pub fn stats(&self, owner: OwnerId) -> OwnerStats {
        self.owned(owner).map(OwnedCells::stats).unwrap_or_default()
    }

    fn split(&self, owner: OwnerId) -> Option<&BorderSplit> {
        self.owned(owner)
            .map(|o| o.split_or_init(|c| self.is_border(c)))
    }

    /// Owned cells of `owner` that touch a differently-owned cell.
    #[must_use]
    pub fn border_cells(&self, owner: OwnerId) -> &[Coord] {
        self.split(owner).map_or(&[][..], |s| s.border.as_slice())
    }

    /// Owned cells of `owner` surrounded by its own territory.
    #[must_use]
    pub fn body_cells(&self, owner: OwnerId) -> &[Coord] {
        self.split(owner).map_or(&[][..], |s| s.body.as_slice())
    }

    /// Production statistics over every cell in the window.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn production_range(&self) -> ProductionRange {
        let mut range = ProductionRange {
            min: u8::MAX,
            max: 0,
            mean: 0.0,
        };
        let mut total = 0u64;
        for cell in &self.cells {
            range.min = range.min.min(cell.production());
            range.max = range.max.max(cell.production());
            total += u64::from(cell.production());
        }
        range.mean = total as f64 / self.cells.len().max(1) as f64;
        range
    }

    /// Every cell whose production equals the window's maximum.
    #[must_use]
    pub fn highest_production_cells(&self) -> Vec<Coord> {
        let max = self.production_range().max;
        self.cells
            .iter()
            .filter(|c| c.production() == max)
            .map(Cell::coord)
            .collect()
    }

    /// Wrapped Manhattan distance on the source torus.
    #[must_use]
    pub fn distance(&self, a: Coord, b: Coord) -> u32 {
        a.torus_distance(b, self.source_width, self.source_height)
    }

    /// Write every cell of this grid back onto `board`.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is not the torus this grid views.
    pub fn apply_to(&self, board: &mut Board) -> CoreResult<()> {
        if board.width() != self.source_width || board.height() != self.source_height {
            return Err(CoreError::BoardMismatch {
                width: self.source_width,
                height: self.source_height,
                actual_width: board.width(),
                actual_height: board.height(),
            });
        }
        for cell in &self.cells {
            board.set(cell.coord(), cell.site());
        }
        Ok(())
    }
}
