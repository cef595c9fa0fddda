//! How far an owner's border strength could push outward.

use super::{Cost, FlowField, Sense, cost_of, propagate};
use crate::board::OwnerId;
use crate::grid::Grid;
use std::collections::BTreeMap;

/// Strength an owner's border could still carry into each reachable cell.
///
/// Seeds are the owner's border cells carrying their own strength. Every hop
/// into foreign land spends that cell's strength, plus its production for
/// each turn of travel when another player holds it. Cells are reachable
/// while strength remains. Magnitudes read as remaining strength.
#[must_use]
pub fn initiative_field(grid: &Grid, owner: OwnerId) -> FlowField {
    propagate(grid, grid.border_cells(owner), Sense::Remaining, |via, cell, field| {
        let Some(via) = via else {
            return Some(-Cost::from(cell.strength()));
        };
        if cell.owner() == owner {
            return None;
        }
        let remaining = -field.cost(via.coord())?;
        let mut opposing = Cost::from(cell.strength());
        if cell.is_owned() {
            let turns = cost_of(field.distance(via.coord())? + 1);
            opposing = opposing.saturating_add(Cost::from(cell.production()).saturating_mul(turns));
        }
        let left = remaining - opposing;
        (left > 0).then_some(-left)
    })
}

/// One initiative field per player other than `owner`.
#[must_use]
pub fn threat_fields(grid: &Grid, owner: OwnerId) -> BTreeMap<OwnerId, FlowField> {
    grid.players()
        .filter(|&p| p != owner)
        .map(|p| (p, initiative_field(grid, p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Site};
    use crate::grid::{Coord, Direction};

    #[test]
    fn test_strength_drains_through_neutral_land() {
        let mut board = Board::filled(9, 1, Site::new(0, 10, 1)).unwrap();
        board.set(Coord::new(0, 0), Site::new(1, 35, 2));
        let grid = Grid::from_board(&board).unwrap();

        let field = initiative_field(&grid, 1);
        assert_eq!(field.magnitude(Coord::new(0, 0)), Some(35));
        assert_eq!(field.magnitude(Coord::new(1, 0)), Some(25));
        assert_eq!(field.direction(Coord::new(1, 0)), Direction::West);
        assert_eq!(field.magnitude(Coord::new(3, 0)), Some(5));
        assert_eq!(field.distance(Coord::new(3, 0)), Some(3));
        assert!(field.entry(Coord::new(4, 0)).is_none());
        assert_eq!(field.magnitude(Coord::new(8, 0)), Some(25));
        assert_eq!(field.direction(Coord::new(8, 0)), Direction::East);
    }

    #[test]
    fn test_enemy_cells_charge_production_per_turn() {
        let mut board = Board::filled(6, 1, Site::new(0, 50, 1)).unwrap();
        board.set(Coord::new(0, 0), Site::new(1, 100, 1));
        board.set(Coord::new(1, 0), Site::new(2, 10, 4));
        board.set(Coord::new(2, 0), Site::new(2, 10, 4));
        let grid = Grid::from_board(&board).unwrap();

        let field = initiative_field(&grid, 1);
        // 100 - (10 + 4 * 1)
        assert_eq!(field.magnitude(Coord::new(1, 0)), Some(86));
        // 86 - (10 + 4 * 2)
        assert_eq!(field.magnitude(Coord::new(2, 0)), Some(68));
    }

    #[test]
    fn test_threat_fields_cover_every_enemy() {
        let mut board = Board::filled(6, 6, Site::new(0, 1, 1)).unwrap();
        board.set(Coord::new(0, 0), Site::new(1, 50, 1));
        board.set(Coord::new(3, 3), Site::new(2, 50, 1));
        board.set(Coord::new(5, 1), Site::new(3, 50, 1));
        let grid = Grid::from_board(&board).unwrap();

        let threats = threat_fields(&grid, 1);
        assert_eq!(threats.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(threats[&2].magnitude(Coord::new(3, 3)), Some(50));
        assert_eq!(threats[&2].magnitude(Coord::new(3, 0)), Some(47));
        assert!(threats[&2].entry(Coord::new(0, 0)).is_none());
    }
}
