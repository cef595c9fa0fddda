//! Combat resolution.
//!
//! [`simulate`] computes the next grid from a grid and a [`MoveSet`]:
//! - Movers become active forces at their destination
//! - Stationary cells next to a destination are drawn in as passive forces
//! - Forces damage every foreign force within one step, then survivors claim
//!   their cells
//! - Owned cells untouched by any of this gain their production

mod moves;
mod simulate;

pub use moves::{Move, MoveSet};
pub use simulate::simulate;
