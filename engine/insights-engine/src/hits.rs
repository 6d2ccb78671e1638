//! # Expected Hits
//!
//! Projects how many of each base parallel one box should yield.

use crate::rated;
use odds_registry::{Category, ConfigSpec, Snapshot};
use serde::{Deserialize, Serialize};

/// Expected pulls of one base parallel per box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedHit {
    pub name: String,
    pub odds: String,
    /// Expected number per box (`total_cards / odds`)
    pub expected: f64,
    /// `"2.0"` for one or more, `"40%"` below one
    pub display: String,
}

/// Expected hits together with the box they were computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculator {
    pub product_id: String,
    pub config: String,
    pub spec: ConfigSpec,
    pub total_cards: u32,
    pub hits: Vec<ExpectedHit>,
}

/// Format an expected count: one decimal when at least one, else a whole percentage
///
/// Halves round up (`1.25` → `"1.3"`, `0.125` → `"13%"`).
pub fn format_expected(expected: f64) -> String {
    if expected >= 1.0 {
        format!("{:.1}", (expected * 10.0).round() / 10.0)
    } else {
        format!("{:.0}%", (expected * 100.0).round())
    }
}

/// Expected hits for every base parallel with usable odds, most likely first
///
/// Unknown products or configs, empty boxes and rows with missing or zero
/// odds produce no entries.
pub fn calculate_expected_hits(
    snapshot: &Snapshot,
    product_id: &str,
    config: &str,
) -> Vec<ExpectedHit> {
    let Some(spec) = snapshot.product(product_id).and_then(|p| p.config(config)) else {
        return Vec::new();
    };
    let total_cards = spec.total_cards();
    if total_cards == 0 {
        return Vec::new();
    }

    let mut hits: Vec<ExpectedHit> = snapshot
        .rows_for(product_id, config)
        .filter(|row| row.category == Category::Base)
        .filter_map(|row| {
            let (value, odds) = rated(row)?;
            if value <= 0.0 {
                return None;
            }
            let expected = total_cards as f64 / value;
            Some(ExpectedHit {
                name: row.display_name().to_string(),
                odds,
                expected,
                display: format_expected(expected),
            })
        })
        .collect();

    hits.sort_by(|a, b| b.expected.total_cmp(&a.expected));
    hits
}

/// Expected hits plus the box breakdown; `None` for an unknown product or config
pub fn calculator(snapshot: &Snapshot, product_id: &str, config: &str) -> Option<Calculator> {
    let spec = snapshot.product(product_id)?.config(config)?.clone();
    Some(Calculator {
        product_id: product_id.to_string(),
        config: config.to_string(),
        total_cards: spec.total_cards(),
        spec,
        hits: calculate_expected_hits(snapshot, product_id, config),
    })
}
