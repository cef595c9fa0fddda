// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Toroid: the decision core of a bot for a toroidal territory game.
//!
//! Each turn the game hands over a board of owned and neutral squares. The
//! core answers with one move per owned square, built from four layers:
//!
//! - [`grid`]: a wrapped window over the board with cached border state and
//!   per-owner aggregates
//! - [`combat`]: a pure simulator resolving a move set into the next grid
//! - [`flow`]: shortest-path sweeps turning grid state into per-cell guidance
//! - [`search`]: exhaustive projection of a small contested window
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Planner (MoveSet)            │
//! ├──────────────────┬──────────────────┤
//! │   Local Search   │   Flow Fields    │
//! ├──────────────────┴──────────────────┤
//! │        Combat Simulator             │
//! ├─────────────────────────────────────┤
//! │        Grid / Cell Model            │
//! └─────────────────────────────────────┘
//! ```
//!
//! Everything runs synchronously on one thread. Simulation and field
//! building never mutate their input grid.

pub mod board;
pub mod combat;
pub mod config;
pub mod error;
pub mod flow;
pub mod grid;
pub mod planner;
pub mod search;

pub use error::{CoreError, CoreResult};

// Re-export key types at crate root for convenience
pub use board::{Board, NEUTRAL, OwnerId, Site};
pub use combat::{Move, MoveSet, simulate};
pub use config::Config;
pub use flow::{Fields, FlowField};
pub use grid::{Coord, Direction, Grid, Window};
pub use planner::plan_moves;
pub use search::LocalSearch;
