//! Local move search.
//!
//! A small window around a contested cell is projected exhaustively: each
//! enemy cell in reach picks its best response, every complete assignment is
//! resolved with [`simulate`](crate::combat::simulate), and the focal cell
//! takes the direction that scores best for its owner.

mod project;
mod score;

pub use project::{LocalSearch, SearchOutcome};
pub use score::ScoringWeights;
