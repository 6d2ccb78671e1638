//! # InsightsEngine
//!
//! Pull-rate analytics over the odds registry.
//!
//! Every query reads one registry snapshot and returns plain data: expected
//! hits per box, chase cards, sleeper hits, best-value configs, rarity tiers,
//! the rarity ladder and the cross-config comparison table.

pub mod cli;
pub mod comparison;
pub mod config;
pub mod hits;
pub mod rankings;
pub mod report;
pub mod tiers;

// Re-export main types for easy usage
pub use comparison::{CompareSection, ComparisonTable};
pub use config::InsightsConfig;
pub use hits::{Calculator, ExpectedHit};
pub use rankings::{BestValue, ChaseCard, SleeperHit};
pub use report::InsightsReport;
pub use tiers::{LadderRung, TierCounts, TierGroups};

use odds_registry::{CsvDirSource, OddsRegistry, OddsRow};
use std::path::Path;
use std::sync::Arc;

/// Normalized value and display text of a row with usable odds
pub(crate) fn rated(row: &OddsRow) -> Option<(f64, String)> {
    let value = row.normalized_odds()?;
    let odds = row.odds_display()?;
    Some((value, odds))
}

/// Load the odds tables from a CSV directory and build an engine over them
pub async fn init_engine(
    data_dir: &Path,
    config: InsightsConfig,
) -> Result<InsightsEngine, anyhow::Error> {
    tracing::info!("Initializing InsightsEngine from {:?}", data_dir);

    let registry = Arc::new(OddsRegistry::new());
    registry.load_from_source(&CsvDirSource::new(data_dir)).await?;

    Ok(InsightsEngine::new(registry, config))
}

/// Main InsightsEngine service
pub struct InsightsEngine {
    registry: Arc<OddsRegistry>,
    config: InsightsConfig,
}

impl InsightsEngine {
    pub fn new(registry: Arc<OddsRegistry>, config: InsightsConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Arc<OddsRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Expected pulls per box for each base parallel
    pub fn calculate_expected_hits(&self, product_id: &str, config: &str) -> Vec<ExpectedHit> {
        hits::calculate_expected_hits(&self.registry.snapshot(), product_id, config)
    }

    pub fn calculator(&self, product_id: &str, config: &str) -> Option<Calculator> {
        hits::calculator(&self.registry.snapshot(), product_id, config)
    }

    pub fn find_chase_cards(&self, product_id: &str, config: &str) -> Vec<ChaseCard> {
        rankings::find_chase_cards(
            &self.registry.snapshot(),
            product_id,
            config,
            self.config.thresholds.chase_threshold,
            self.config.thresholds.chase_limit,
        )
    }

    pub fn group_by_rarity_tier(&self, product_id: &str, config: &str) -> TierGroups {
        tiers::group_by_rarity_tier(&self.registry.snapshot(), product_id, config)
    }

    pub fn find_sleeper_hit(&self, product_id: &str, config: &str) -> Option<SleeperHit> {
        rankings::find_sleeper_hit(
            &self.registry.snapshot(),
            product_id,
            config,
            self.config.thresholds.sleeper_multiplier,
        )
    }

    pub fn find_best_value_config(&self, product_id: &str, name: &str) -> Option<BestValue> {
        rankings::find_best_value_config(&self.registry.snapshot(), product_id, name)
    }

    pub fn compare_configs(&self, product_id: &str, section: CompareSection) -> ComparisonTable {
        comparison::compare_configs(&self.registry.snapshot(), product_id, section)
    }

    pub fn rarity_ladder(&self, product_id: &str, config: &str) -> Vec<LadderRung> {
        tiers::rarity_ladder(&self.registry.snapshot(), product_id, config, &self.config.bubbles)
    }

    pub fn insights_report(&self, product_id: &str, config: &str) -> InsightsReport {
        report::build_report(&self.registry.snapshot(), product_id, config, &self.config)
    }
}
