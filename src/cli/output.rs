//! Output formatting utilities for CLI.

use serde::Serialize;
use std::collections::BTreeMap;
use toroid::board::{Board, NEUTRAL, OwnerId};
use toroid::combat::MoveSet;
use toroid::grid::{Grid, OwnerStats};
use toroid::search::SearchOutcome;

/// JSON-serializable turn result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTurn<'a> {
    /// Board after the turn.
    pub(super) board: &'a Board,
    /// Totals per player.
    pub(super) players: BTreeMap<OwnerId, OwnerStats>,
}

impl<'a> JsonTurn<'a> {
    /// Create from the resolved board and grid.
    pub(super) fn new(board: &'a Board, grid: &Grid) -> Self {
        Self {
            board,
            players: grid.players().map(|p| (p, grid.stats(p))).collect(),
        }
    }
}

/// Format a board as rows of `owner:strength`, neutral owners shown as `.`.
pub(super) fn format_board(board: &Board) -> String {
    let mut output = String::new();
    let mut row = 0;
    for (coord, site) in board.iter() {
        if coord.y != row {
            output.push('\n');
            row = coord.y;
        } else if coord.x > 0 {
            output.push(' ');
        }
        if site.owner == NEUTRAL {
            output.push_str(&format!(".:{:>3}", site.strength));
        } else {
            output.push_str(&format!("{}:{:>3}", site.owner, site.strength));
        }
    }
    output.push('\n');
    output
}

/// Format per-player totals, one line each.
pub(super) fn format_players(grid: &Grid) -> String {
    let mut output = String::new();
    for player in grid.players() {
        let stats = grid.stats(player);
        output.push_str(&format!(
            "  Player {player}: territory {}, strength {}, production {}\n",
            stats.territory, stats.strength, stats.production
        ));
    }
    output
}

/// Format a move set, one `(x, y) Direction` per line.
pub(super) fn format_moves(moves: &MoveSet) -> String {
    let mut output = String::new();
    for m in moves.iter() {
        output.push_str(&format!("  ({}, {}) {:?}\n", m.coord.x, m.coord.y, m.direction));
    }
    output
}

/// Format a search outcome with its candidate scores.
pub(super) fn format_search(outcome: &SearchOutcome) -> String {
    let mut output = String::new();
    output.push_str(&format!("Best: {:?} ({:.4})\n", outcome.direction, outcome.score));
    for (direction, score) in &outcome.candidates {
        output.push_str(&format!("  {direction:?}: {score:.4}\n"));
    }
    output.push_str(&format!(
        "Deciders: {} ({} held), simulations: {}\n",
        outcome.deciders.len(),
        outcome.held,
        outcome.simulations
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use toroid::board::Site;
    use toroid::combat::Move;
    use toroid::grid::{Coord, Direction};

    #[test]
    fn test_format_board_rows() {
        let mut board = Board::filled(2, 2, Site::new(0, 3, 1)).unwrap();
        board.set(Coord::new(1, 0), Site::new(2, 40, 1));
        assert_eq!(format_board(&board), ".:  3 2: 40\n.:  3 .:  3\n");
    }

    #[test]
    fn test_format_moves_one_per_line() {
        let moves: MoveSet = [
            Move::new(Coord::new(1, 0), Direction::East),
            Move::new(Coord::new(0, 2), Direction::Still),
        ]
        .into_iter()
        .collect();
        assert_eq!(format_moves(&moves), "  (1, 0) East\n  (0, 2) Still\n");
    }

    #[test]
    fn test_format_players_lists_owned_totals() {
        let mut board = Board::filled(2, 1, Site::new(0, 3, 1)).unwrap();
        board.set(Coord::new(0, 0), Site::new(1, 40, 2));
        let grid = Grid::from_board(&board).unwrap();
        assert_eq!(
            format_players(&grid),
            "  Player 1: territory 1, strength 40, production 2\n"
        );
    }
}
