//! # Config Comparison
//!
//! Side-by-side odds of every card across all box configs of a product.

use odds_registry::{normalize, ColorBand, CrossConfigOdds, Snapshot};
use serde::{Deserialize, Serialize};

/// Which cards to compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompareSection {
    /// Base parallels
    Base,
    /// Inserts (SSP flagged)
    Inserts,
    /// Autographs
    Autos,
}

/// One cell of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonCell {
    pub config: String,
    /// `None` when the config has no row or the odds cell is empty
    pub odds: Option<String>,
    pub color: ColorBand,
    pub is_best: bool,
}

/// One card across all configs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub name: String,
    pub is_ssp: bool,
    /// One cell per config column, in column order
    pub cells: Vec<ComparisonCell>,
    /// Config with the best pull rate; only set when there is more than one column
    pub best_config: Option<String>,
}

/// Comparison table for one section of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub section: CompareSection,
    pub configs: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Lowest normalized odds across `configs`; the first column wins ties
pub fn best_config(entry: &CrossConfigOdds, configs: &[String]) -> Option<String> {
    let mut best: Option<(&String, f64)> = None;
    for config in configs {
        let Some(value) = entry.odds_by_config.get(config).and_then(|o| normalize(o.as_deref()))
        else {
            continue;
        };
        if best.map_or(true, |(_, best_value)| value < best_value) {
            best = Some((config, value));
        }
    }
    best.map(|(config, _)| config.clone())
}

/// Build the comparison table of a product section
pub fn compare_configs(
    snapshot: &Snapshot,
    product_id: &str,
    section: CompareSection,
) -> ComparisonTable {
    let configs = snapshot.configs_available(product_id);
    let entries = match section {
        CompareSection::Base => snapshot.all_parallels_across_configs(product_id),
        CompareSection::Inserts => snapshot.all_inserts_across_configs(product_id),
        CompareSection::Autos => snapshot.all_autographs_across_configs(product_id),
    };

    let rows = entries
        .iter()
        .map(|entry| {
            let best = if configs.len() > 1 { best_config(entry, &configs) } else { None };
            let cells = configs
                .iter()
                .map(|config| {
                    let odds = entry.odds_by_config.get(config).cloned().flatten();
                    ComparisonCell {
                        config: config.clone(),
                        color: ColorBand::for_odds(normalize(odds.as_deref())),
                        is_best: best.as_deref() == Some(config.as_str()),
                        odds,
                    }
                })
                .collect();

            ComparisonRow {
                name: entry.name.clone(),
                is_ssp: section == CompareSection::Inserts && entry.is_ssp,
                cells,
                best_config: best,
            }
        })
        .collect();

    ComparisonTable { section, configs, rows }
}
