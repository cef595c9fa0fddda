//! Error types for the decision core.
//!
//! Only contract failures are errors. Degenerate inputs (an owner with no
//! cells, a flat production map, a Still move) are ordinary cases and are
//! handled where they occur.

use crate::board::OwnerId;
use crate::grid::Coord;
use thiserror::Error;

/// Errors raised while building grids, simulating combat or loading config.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A board or window with a zero dimension.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },

    /// A board whose site list does not cover its dimensions.
    #[error("expected {expected} sites, got {actual}")]
    SiteCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Sites actually supplied.
        actual: usize,
    },

    /// A window larger than the torus it views.
    #[error("window {width}x{height} exceeds source {source_width}x{source_height}")]
    WindowTooLarge {
        /// Window width.
        width: u16,
        /// Window height.
        height: u16,
        /// Torus width.
        source_width: u16,
        /// Torus height.
        source_height: u16,
    },

    /// A lookup or move that falls outside the grid window.
    #[error("coordinate ({}, {}) is outside the grid window", coord.x, coord.y)]
    OutsideWindow {
        /// Offending coordinate.
        coord: Coord,
    },

    /// A board snapshot whose dimensions differ from the grid's torus.
    #[error("board is {actual_width}x{actual_height}, grid expects {width}x{height}")]
    BoardMismatch {
        /// Torus width the grid was built for.
        width: u16,
        /// Torus height the grid was built for.
        height: u16,
        /// Width of the offered board.
        actual_width: u16,
        /// Height of the offered board.
        actual_height: u16,
    },

    /// Two forces survived combat on the same cell.
    #[error("cell ({}, {}) claimed by owners {first} and {second}", coord.x, coord.y)]
    ContestedCell {
        /// Location of the double claim.
        coord: Coord,
        /// First surviving owner.
        first: OwnerId,
        /// Second surviving owner.
        second: OwnerId,
    },

    /// A configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem error while loading input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type CoreResult<T> = Result<T, CoreError>;
