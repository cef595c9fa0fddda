//! Simulate command implementation.

use super::output::{JsonTurn, format_board, format_players};
use super::{CliError, OutputFormat, load_board};
use std::path::Path;
use toroid::combat::{MoveSet, simulate};
use toroid::grid::Grid;

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded or the moves fail to
/// resolve.
pub(crate) fn execute(board: &Path, moves: &Path, format: OutputFormat) -> Result<(), CliError> {
    let mut snapshot = load_board(board)?;
    let moves = MoveSet::from_json_file(moves)
        .map_err(|e| CliError::new(format!("Failed to load moves {}: {e}", moves.display())))?;

    let grid = Grid::from_board(&snapshot)?;
    let next = simulate(&grid, &moves)?;
    next.apply_to(&mut snapshot)?;

    match format {
        OutputFormat::Text => {
            println!("Resolved {} moves", moves.len());
            print!("{}", format_board(&snapshot));
            println!();
            print!("{}", format_players(&next));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonTurn::new(&snapshot, &next))?;
            println!("{json}");
        }
    }
    Ok(())
}
