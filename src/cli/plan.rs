//! Plan command implementation.

use super::output::format_moves;
use super::{CliError, OutputFormat, load_board, load_config};
use std::path::Path;
use toroid::grid::Grid;
use toroid::planner::plan_moves;

/// Execute the plan command.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded or planning fails.
pub(crate) fn execute(
    board: &Path,
    owner: u8,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    if owner == 0 {
        return Err(CliError::new("Owner 0 is neutral and cannot be planned for"));
    }
    let snapshot = load_board(board)?;
    let config = load_config(config)?;

    let grid = Grid::from_board(&snapshot)?;
    let moves = plan_moves(&grid, owner, &config)?;

    match format {
        OutputFormat::Text => {
            println!("Player {owner}: {} moves", moves.len());
            print!("{}", format_moves(&moves));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&moves)?);
        }
    }
    Ok(())
}
