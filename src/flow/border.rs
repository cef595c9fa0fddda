//! Guidance towards an owner's own border.

use super::{Cost, FlowField, Sense, propagate};
use crate::board::OwnerId;
use crate::grid::Grid;

/// Cumulative production from each owned cell to its nearest border cell.
///
/// Seeds are the owner's border cells, priced at their own production. Only
/// the owner's territory is reachable. Interior cells following the field
/// reach the frontier through the least productive path.
#[must_use]
pub fn border_field(grid: &Grid, owner: OwnerId) -> FlowField {
    propagate(grid, grid.border_cells(owner), Sense::Cost, |via, cell, field| {
        if cell.owner() != owner {
            return None;
        }
        let here = Cost::from(cell.production());
        match via {
            None => Some(here),
            Some(v) => field.cost(v.coord()).map(|c| c + here),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Site};
    use crate::grid::{Coord, Direction};

    /// 7x7 neutral board with a 5x5 block of owner 1 in the middle.
    fn block() -> Grid {
        let mut board = Board::filled(7, 7, Site::new(0, 5, 1)).unwrap();
        for y in 1..6 {
            for x in 1..6 {
                board.set(Coord::new(x, y), Site::new(1, 10, 2));
            }
        }
        board.set(Coord::new(3, 2), Site::new(1, 10, 9));
        Grid::from_board(&board).unwrap()
    }

    #[test]
    fn test_border_cells_are_seeds() {
        let grid = block();
        let field = border_field(&grid, 1);
        assert_eq!(field.seeds().len(), 16);
        assert_eq!(field.distance(Coord::new(1, 1)), Some(0));
        assert_eq!(field.cost(Coord::new(1, 1)), Some(2));
        assert!(field.entry(Coord::new(0, 0)).is_none());
        assert_eq!(field.len(), 25);
    }

    #[test]
    fn test_interior_avoids_expensive_cells() {
        let grid = block();
        let field = border_field(&grid, 1);
        // (3,3) is two hops from every side; north runs through production 9.
        assert_eq!(field.distance(Coord::new(3, 3)), Some(2));
        assert_eq!(field.cost(Coord::new(3, 3)), Some(6));
        assert_ne!(field.direction(Coord::new(3, 3)), Direction::North);
        assert_ne!(field.direction(Coord::new(3, 3)), Direction::Still);
    }

    #[test]
    fn test_owner_without_cells_gets_empty_field() {
        let grid = block();
        assert!(border_field(&grid, 4).is_empty());
    }
}
