//! Grid invariants - consistency checks that detect bugs.
//!
//! Owner aggregates and memoized cell state must always agree with the cell
//! contents. A violation means some path mutated cells without resetting
//! the grid.

use super::cell::Derived;
use super::{Grid, OwnerStats};
use crate::board::OwnerId;
use std::collections::BTreeMap;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all grid invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(grid: &Grid) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut expected: BTreeMap<OwnerId, OwnerStats> = BTreeMap::new();

    for cell in grid.cells() {
        let stats = expected.entry(cell.owner()).or_default();
        stats.production += u32::from(cell.production());
        stats.strength += u32::from(cell.strength());
        stats.territory += 1;

        // Memoized state must match a fresh derivation
        if let Some(cached) = cell.cached() {
            if *cached != Derived::new(cell.owner(), grid.neighbor_views(cell.coord())) {
                violations.push(InvariantViolation {
                    message: format!(
                        "Cell at ({}, {}) has stale cached border state",
                        cell.coord().x,
                        cell.coord().y
                    ),
                });
            }
        }
    }

    for owned in grid.owners() {
        let want = expected.remove(&owned.owner()).unwrap_or_default();
        if owned.stats() != want {
            violations.push(InvariantViolation {
                message: format!(
                    "Owner {} aggregates {:?} disagree with cells {:?}",
                    owned.owner(),
                    owned.stats(),
                    want
                ),
            });
        }
        for &coord in owned.cells() {
            if grid.cell(coord).is_none_or(|c| c.owner() != owned.owner()) {
                violations.push(InvariantViolation {
                    message: format!(
                        "Owner {} lists ({}, {}) which it does not hold",
                        owned.owner(),
                        coord.x,
                        coord.y
                    ),
                });
            }
        }
    }

    for (owner, stats) in expected {
        violations.push(InvariantViolation {
            message: format!("Owner {owner} holds {} cells but has no bucket", stats.territory),
        });
    }

    violations
}

/// Assert all grid invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(grid: &Grid) {
    let violations = check_invariants(grid);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Grid invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_grid: &Grid) {}
