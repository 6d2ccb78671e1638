//! # Configuration Management
//!
//! Thresholds and limits used by the insights queries.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the InsightsEngine
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InsightsConfig {
    /// Ranking thresholds
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    /// Rarity bubble sizing
    #[serde(default)]
    pub bubbles: BubbleConfig,
}

/// Ranking thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Minimum normalized odds for a chase card (1-in-N)
    pub chase_threshold: f64,
    /// Maximum number of chase cards reported
    pub chase_limit: usize,
    /// How many times rarer than the runner-up a sleeper hit must be
    pub sleeper_multiplier: f64,
    /// Maximum number of best-value entries in an insights report
    pub best_value_limit: usize,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            chase_threshold: 200.0,
            chase_limit: 5,
            sleeper_multiplier: 3.0,
            best_value_limit: 5,
        }
    }
}

/// Bubble radius range; rarer parallels get smaller bubbles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BubbleConfig {
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self { min_radius: 20.0, max_radius: 70.0 }
    }
}

impl InsightsConfig {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: InsightsConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), anyhow::Error> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
