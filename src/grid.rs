//! Grid and cell model.
//!
//! A [`Grid`] holds the cells of a rectangular window over a toroidal board:
//! - [`Coord`], [`Direction`] and [`Window`] addressing with wrap-around
//! - [`Cell`]s with memoized border and damage state
//! - Per-owner aggregates ([`OwnedCells`], [`OwnerStats`]) with a lazy
//!   border/body split

mod cell;
mod coord;
pub mod invariants;
mod owned;
mod torus;

pub use cell::Cell;
pub use coord::{Coord, Direction, Window};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use owned::{OwnedCells, OwnerStats};
pub use torus::{Grid, ProductionRange};
