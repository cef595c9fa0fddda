//! CLI command implementations for Toroid.

pub(crate) mod generate;
pub(crate) mod plan;
pub(crate) mod search;
pub(crate) mod simulate;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::Path;
use toroid::board::Board;
use toroid::config::Config;
use toroid::error::CoreError;

/// Output format for every command that prints a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {e}"))
    }
}

impl From<CoreError> for CliError {
    fn from(e: CoreError) -> Self {
        Self::new(e.to_string())
    }
}

/// Load a board snapshot, naming the file on failure.
fn load_board(path: &Path) -> Result<Board, CliError> {
    Board::from_json_file(path)
        .map_err(|e| CliError::new(format!("Failed to load board {}: {e}", path.display())))
}

/// Load a config file, or the defaults when none is given.
fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    match path {
        Some(path) => Config::from_json_file(path)
            .map_err(|e| CliError::new(format!("Failed to load config {}: {e}", path.display()))),
        None => Ok(Config::default()),
    }
}
