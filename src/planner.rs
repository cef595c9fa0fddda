//! Per-turn move selection.
//!
//! The planner turns one owner's fields into a full move set:
//!
//! - Border cells in reach of an enemy run the [`LocalSearch`] (when
//!   enabled).
//! - While no enemy reaches the frontier at all, border cells head for the
//!   nearest rich cell the owner does not hold, stepping only onto weaker
//!   cells.
//! - Otherwise border cells attack their best target when the attack
//!   succeeds outright or trades favourably, and hold if it does neither.
//! - Interior cells wait until they hold `hold_multiplier` turns of
//!   production, then reinforce a nearby border need or follow the body
//!   field to the edge that needs them.
//!
//! Every owned cell gets exactly one move, Still included.

use crate::board::OwnerId;
use crate::combat::MoveSet;
use crate::config::Config;
use crate::error::CoreResult;
use crate::flow::Fields;
use crate::grid::{Coord, Direction, Grid, Window};
use crate::search::LocalSearch;

/// Plan one turn of moves for `owner`.
///
/// # Errors
///
/// Returns the first error raised by a local search. No partial move set is
/// returned.
pub fn plan_moves(grid: &Grid, owner: OwnerId, config: &Config) -> CoreResult<MoveSet> {
    let fields = Fields::build(grid, owner);
    let search = LocalSearch::new(&config.search);
    let planner = config.planner;
    let mut moves = MoveSet::new();
    let (mut searched, mut attacks, mut supports, mut advances) = (0usize, 0usize, 0usize, 0usize);
    let contested = fields.contested(grid.border_cells(owner));

    for &coord in grid.border_cells(owner) {
        let direction = if planner.search_engaged
            && fields.engaged(coord)
            && search_fits(grid, coord, config.search.window)
        {
            searched += 1;
            search.best_direction(grid, coord)?.direction
        } else if contested {
            attack(grid, coord, owner)
        } else {
            prospect(grid, &fields, coord).unwrap_or_else(|| attack(grid, coord, owner))
        };
        if direction != Direction::Still {
            attacks += 1;
        }
        moves.insert(coord, direction);
    }

    for &coord in grid.body_cells(owner) {
        let Some(cell) = grid.cell(coord) else {
            continue;
        };
        let reserve = u32::from(planner.hold_multiplier) * u32::from(cell.production());
        let direction = if u32::from(cell.strength()) <= reserve {
            Direction::Still
        } else if needs_support(&fields, coord, planner.support_reach) {
            supports += 1;
            fields.support.direction(coord)
        } else {
            advances += 1;
            fields.body.direction(coord)
        };
        moves.insert(coord, direction);
    }

    tracing::debug!(
        owner,
        contested,
        moves = moves.len(),
        searched,
        attacks,
        supports,
        advances,
        "planned turn"
    );
    Ok(moves)
}

/// Step towards the nearest unheld rich cell if the step can be taken.
///
/// `None` when no prospect is reachable from `coord`.
fn prospect(grid: &Grid, fields: &Fields, coord: Coord) -> Option<Direction> {
    let cell = grid.cell(coord)?;
    let entry = fields.prospects.entry(coord).filter(|e| e.distance > 0)?;
    let next = grid.neighbor(coord, entry.direction)?;
    Some(if cell.strength() > next.strength() {
        entry.direction
    } else {
        Direction::Still
    })
}

/// Attack the best neighbour if it falls or the trade is favourable.
fn attack(grid: &Grid, coord: Coord, owner: OwnerId) -> Direction {
    let Some(cell) = grid.cell(coord) else {
        return Direction::Still;
    };
    let mut best: Option<(Direction, Coord, u8, f64)> = None;
    for (direction, other) in grid.neighbors(coord) {
        if other.owner() == owner {
            continue;
        }
        let value = grid.heuristic(other.coord(), owner);
        if best.is_none_or(|(_, _, _, top)| value > top) {
            best = Some((direction, other.coord(), other.strength(), value));
        }
    }
    match best {
        Some((direction, target, strength, _))
            if strength < cell.strength() || grid.overkill(target, owner, cell.strength()) > 0 =>
        {
            direction
        }
        _ => Direction::Still,
    }
}

fn needs_support(fields: &Fields, coord: Coord, reach: u32) -> bool {
    let near = fields
        .support
        .distance(coord)
        .is_some_and(|d| d > 0 && d <= reach);
    near && fields.support.magnitude(coord).is_some_and(|need| need > 0)
}

/// True if the search window around `coord` lies inside `grid`.
fn search_fits(grid: &Grid, coord: Coord, size: u16) -> bool {
    let (width, height) = (grid.source_width(), grid.source_height());
    let window = Window::centered(coord, size, width, height);
    (0..window.height).all(|ly| {
        (0..window.width).all(|lx| grid.contains(window.absolute(lx, ly, width, height)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Site};
    use crate::config::PlannerConfig;

    fn plan(board: &Board, owner: OwnerId, config: &Config) -> MoveSet {
        plan_moves(&Grid::from_board(board).unwrap(), owner, config).unwrap()
    }

    #[test]
    fn test_attacks_richest_weak_neighbour() {
        let mut board = Board::filled(5, 5, Site::new(0, 10, 1)).unwrap();
        board.set(Coord::new(2, 2), Site::new(1, 50, 1));
        board.set(Coord::new(3, 2), Site::new(0, 10, 9));

        let moves = plan(&board, 1, &Config::default());
        assert_eq!(moves.len(), 1);
        assert_eq!(moves.direction(Coord::new(2, 2)), Direction::East);
    }

    #[test]
    fn test_quiet_border_heads_for_prospect() {
        let mut board = Board::filled(7, 7, Site::new(0, 10, 1)).unwrap();
        board.set(Coord::new(2, 2), Site::new(1, 50, 1));
        // Cheap bait to the north, a rich cell two steps east.
        board.set(Coord::new(2, 1), Site::new(0, 1, 1));
        board.set(Coord::new(3, 2), Site::new(0, 20, 1));
        board.set(Coord::new(4, 2), Site::new(0, 1, 9));
        let grid = Grid::from_board(&board).unwrap();
        assert_eq!(attack(&grid, Coord::new(2, 2), 1), Direction::North);

        let moves = plan_moves(&grid, 1, &Config::default()).unwrap();
        assert_eq!(moves.direction(Coord::new(2, 2)), Direction::East);
    }

    #[test]
    fn test_prospect_waits_for_strength() {
        let mut board = Board::filled(7, 7, Site::new(0, 10, 1)).unwrap();
        board.set(Coord::new(2, 2), Site::new(1, 15, 1));
        board.set(Coord::new(3, 2), Site::new(0, 20, 1));
        board.set(Coord::new(4, 2), Site::new(0, 1, 9));
        let grid = Grid::from_board(&board).unwrap();

        let fields = Fields::build(&grid, 1);
        assert_eq!(fields.prospects.direction(Coord::new(2, 2)), Direction::East);
        assert_eq!(prospect(&grid, &fields, Coord::new(2, 2)), Some(Direction::Still));
    }

    #[test]
    fn test_weak_border_holds() {
        let mut board = Board::filled(5, 5, Site::new(0, 10, 1)).unwrap();
        board.set(Coord::new(2, 2), Site::new(1, 5, 1));

        let moves = plan(&board, 1, &Config::default());
        assert_eq!(moves.len(), 1);
        assert_eq!(moves.direction(Coord::new(2, 2)), Direction::Still);
    }

    /// 7x1 strip: owner 1 holds x = 0..=2 behind strong neutral walls.
    fn strip(body_strength: u8) -> Board {
        let mut board = Board::filled(7, 1, Site::new(0, 100, 1)).unwrap();
        board.set(Coord::new(0, 0), Site::new(1, 5, 1));
        board.set(Coord::new(1, 0), Site::new(1, body_strength, 1));
        board.set(Coord::new(2, 0), Site::new(1, 5, 1));
        board
    }

    #[test]
    fn test_body_reinforces_border_need() {
        let moves = plan(&strip(30), 1, &Config::default());
        assert_eq!(moves.len(), 3);
        assert_eq!(moves.direction(Coord::new(0, 0)), Direction::Still);
        assert_eq!(moves.direction(Coord::new(2, 0)), Direction::Still);
        assert_eq!(moves.direction(Coord::new(1, 0)), Direction::East);
    }

    #[test]
    fn test_body_walks_to_frontier_without_support() {
        let config = Config {
            planner: PlannerConfig {
                support_reach: 0,
                ..PlannerConfig::default()
            },
            ..Config::default()
        };
        let moves = plan(&strip(30), 1, &config);
        assert_eq!(moves.direction(Coord::new(1, 0)), Direction::East);
    }

    #[test]
    fn test_weak_body_holds() {
        let moves = plan(&strip(3), 1, &Config::default());
        assert_eq!(moves.direction(Coord::new(1, 0)), Direction::Still);
    }

    #[test]
    fn test_engaged_border_uses_search() {
        let mut board = Board::filled(7, 7, Site::new(0, 0, 1)).unwrap();
        board.set(Coord::new(3, 3), Site::new(1, 40, 2));
        board.set(Coord::new(4, 3), Site::new(2, 60, 2));
        let grid = Grid::from_board(&board).unwrap();
        let config = Config::default();
        assert!(Fields::build(&grid, 1).engaged(Coord::new(3, 3)));

        let moves = plan_moves(&grid, 1, &config).unwrap();
        let expected = LocalSearch::new(&config.search)
            .best_direction(&grid, Coord::new(3, 3))
            .unwrap();
        assert_eq!(moves.direction(Coord::new(3, 3)), expected.direction);
    }

    #[test]
    fn test_partial_grid_skips_search() {
        let mut board = Board::filled(9, 9, Site::new(0, 0, 1)).unwrap();
        board.set(Coord::new(0, 0), Site::new(1, 40, 2));
        board.set(Coord::new(1, 0), Site::new(2, 60, 2));
        let window = Window {
            origin: Coord::new(0, 0),
            width: 3,
            height: 3,
        };
        let grid = Grid::build(window, &board).unwrap();
        let fields = Fields::build(&grid, 1);
        assert!(fields.engaged(Coord::new(0, 0)));

        let moves = plan_moves(&grid, 1, &Config::default()).unwrap();
        assert_eq!(moves.direction(Coord::new(0, 0)), Direction::Still);
    }

    #[test]
    fn test_absent_owner_plans_nothing() {
        let board = Board::filled(4, 4, Site::new(0, 1, 1)).unwrap();
        assert!(plan(&board, 3, &Config::default()).is_empty());
    }
}
