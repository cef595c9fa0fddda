//! Scalar scoring of an owner's change over one simulated turn.

use crate::board::MAX_STRENGTH;
use crate::grid::OwnerStats;
use serde::{Deserialize, Serialize};

/// Weights applied to normalized production, strength and territory deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight of the production delta per window cell (default: 0.6).
    pub production: f64,
    /// Weight of the strength delta per full cell of strength (default: 0.3).
    pub strength: f64,
    /// Weight of the territory delta per window cell (default: 0.2).
    pub territory: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            production: 0.6,
            strength: 0.3,
            territory: 0.2,
        }
    }
}

impl ScoringWeights {
    /// Weighted change from `before` to `after` over a window of `area` cells.
    ///
    /// Production and territory are normalized by `area`, strength by the
    /// strength cap. An empty area is treated as one cell.
    #[must_use]
    pub fn score(&self, before: OwnerStats, after: OwnerStats, area: u32) -> f64 {
        let area = f64::from(area.max(1));
        let delta = |a: u32, b: u32| f64::from(b) - f64::from(a);

        self.production * delta(before.production, after.production) / area
            + self.strength * delta(before.strength, after.strength) / f64::from(MAX_STRENGTH)
            + self.territory * delta(before.territory, after.territory) / area
    }

    /// True if every weight is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.production.is_finite() && self.strength.is_finite() && self.territory.is_finite()
    }
}
