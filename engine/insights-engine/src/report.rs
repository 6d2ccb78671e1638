//! # Insights Report
//!
//! Everything the insights dashboard shows for one product/config.

use crate::config::InsightsConfig;
use crate::rankings::{
    find_best_value_config, find_chase_cards, find_sleeper_hit, BestValue, ChaseCard, SleeperHit,
};
use crate::tiers::{group_by_rarity_tier, TierCounts, TierGroups};
use odds_registry::Snapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub product_id: String,
    pub config: String,
    pub sleeper: Option<SleeperHit>,
    pub chase_cards: Vec<ChaseCard>,
    pub tier_counts: TierCounts,
    pub tiers: TierGroups,
    /// Best config for each base parallel, in comparison-table order
    pub best_values: Vec<BestValue>,
}

pub fn build_report(
    snapshot: &Snapshot,
    product_id: &str,
    config: &str,
    settings: &InsightsConfig,
) -> InsightsReport {
    let thresholds = &settings.thresholds;
    let tiers = group_by_rarity_tier(snapshot, product_id, config);

    let best_values = snapshot
        .all_parallels_across_configs(product_id)
        .iter()
        .filter_map(|entry| find_best_value_config(snapshot, product_id, &entry.name))
        .take(thresholds.best_value_limit)
        .collect();

    InsightsReport {
        product_id: product_id.to_string(),
        config: config.to_string(),
        sleeper: find_sleeper_hit(snapshot, product_id, config, thresholds.sleeper_multiplier),
        chase_cards: find_chase_cards(
            snapshot,
            product_id,
            config,
            thresholds.chase_threshold,
            thresholds.chase_limit,
        ),
        tier_counts: tiers.counts(),
        tiers,
        best_values,
    }
}
