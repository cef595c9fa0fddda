//! Generate command implementation.

use super::CliError;
use std::fs;
use std::path::Path;
use toroid::board::mapgen::generate;

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if the board parameters are invalid or the output file
/// cannot be written.
pub(crate) fn execute(
    seed: u64,
    width: u16,
    height: u16,
    players: u8,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let board = generate(seed, width, height, players)?;
    let json = serde_json::to_string(&board)?;

    match output {
        Some(path) => {
            fs::write(path, json).map_err(|e| {
                CliError::new(format!("Failed to write {}: {e}", path.display()))
            })?;
            eprintln!("Wrote {width}x{height} board (seed {seed}) to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
