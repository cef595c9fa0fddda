//! Flow fields: per-cell guidance from a variable-cost shortest-path sweep.
//!
//! [`propagate`] is the engine. Each field variant only supplies seeds and a
//! cost function:
//! - [`border_field`]: cumulative production to the nearest own border cell
//! - [`body_field`]: the border field biased towards threatened edges or
//!   unheld rich cells
//! - [`initiative_field`] / [`threat_fields`]: how far an owner's border
//!   strength could push outward
//! - [`production_field`] / [`conquest_field`]: cumulative production or
//!   strength to reach chosen targets, with [`attraction_field`] and
//!   [`prospect_field`] aimed at the richest cells
//! - [`support_field`]: reinforcement needed behind each border attack
//!
//! [`Fields`] builds the set a planner needs for one turn.

mod body;
mod border;
mod field;
mod fields;
mod initiative;
mod production;
mod support;

pub use body::body_field;
pub use border::border_field;
pub use field::{Cost, FlowEntry, FlowField, MAX_COST, Sense, propagate};
pub use fields::Fields;
pub use initiative::{initiative_field, threat_fields};
pub use production::{attraction_field, conquest_field, production_field, prospect_field};
pub use support::support_field;

/// Convert a non-negative amount to a [`Cost`], saturating at [`MAX_COST`].
pub(crate) fn cost_of(value: u32) -> Cost {
    Cost::try_from(value).map_or(MAX_COST, |c| c.min(MAX_COST))
}
