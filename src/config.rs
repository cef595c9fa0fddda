//! Tuning knobs for search and move planning.
//!
//! Every struct deserializes with defaults for missing fields, so a config
//! file only needs the values it changes.

use crate::error::{CoreError, CoreResult};
use crate::search::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest search window side.
pub const MAX_SEARCH_WINDOW: u16 = 5;

/// Configuration for the local move search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Side of the square window searched around a focal cell (default: 5).
    pub window: u16,
    /// Enemy cells allowed to branch; the rest hold Still (default: 6).
    pub max_deciders: usize,
    /// Weights for scoring a projected turn.
    pub weights: ScoringWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            window: MAX_SEARCH_WINDOW,
            max_deciders: 6,
            weights: ScoringWeights::default(),
        }
    }
}

/// Configuration for turn planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Interior cells move once strength exceeds this many turns of
    /// production (default: 5).
    pub hold_multiplier: u16,
    /// Interior cells within this many hops of a border need reinforce it
    /// (default: 4).
    pub support_reach: u32,
    /// Run the local search for border cells in reach of an enemy
    /// (default: true).
    pub search_engaged: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hold_multiplier: 5,
            support_reach: 4,
            search_engaged: true,
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local search settings.
    pub search: SearchConfig,
    /// Planner settings.
    pub planner: PlannerConfig,
}

impl Config {
    /// Load and validate a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value
    /// is out of range.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Check every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> CoreResult<()> {
        let window = self.search.window;
        if !(1..=MAX_SEARCH_WINDOW).contains(&window) {
            return Err(CoreError::InvalidConfig(format!(
                "search.window must be 1..={MAX_SEARCH_WINDOW}, got {window}"
            )));
        }
        if !self.search.weights.is_finite() {
            return Err(CoreError::InvalidConfig(
                "search.weights must be finite".to_string(),
            ));
        }
        if self.planner.hold_multiplier == 0 {
            return Err(CoreError::InvalidConfig(
                "planner.hold_multiplier must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
