//! Search command implementation.

use super::output::format_search;
use super::{CliError, OutputFormat, load_board, load_config};
use std::path::Path;
use toroid::grid::{Coord, Grid};
use toroid::search::LocalSearch;

/// Execute the search command.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded, the focal cell is off the
/// board, or a projected turn fails to resolve.
pub(crate) fn execute(
    board: &Path,
    x: u16,
    y: u16,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let snapshot = load_board(board)?;
    let config = load_config(config)?;
    if x >= snapshot.width() || y >= snapshot.height() {
        return Err(CliError::new(format!(
            "Cell ({x}, {y}) is outside the {}x{} board",
            snapshot.width(),
            snapshot.height()
        )));
    }

    let grid = Grid::from_board(&snapshot)?;
    let outcome = LocalSearch::new(&config.search).best_direction(&grid, Coord::new(x, y))?;

    match format {
        OutputFormat::Text => print!("{}", format_search(&outcome)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }
    Ok(())
}
