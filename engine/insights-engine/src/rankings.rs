//! # Rankings
//!
//! Chase cards, sleeper hits and best-value configs.

use crate::rated;
use odds_registry::{Category, RarityTier, Snapshot};
use serde::{Deserialize, Serialize};

/// A card at or beyond the chase threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaseCard {
    pub name: String,
    pub category: Category,
    pub odds: String,
    pub odds_value: f64,
    pub tier: RarityTier,
}

/// A base parallel far rarer than the next-rarest one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleeperHit {
    pub card: String,
    pub odds: String,
    pub odds_value: f64,
    /// The next-rarest parallel
    pub runner_up: String,
    pub runner_up_odds: String,
    /// `round(rarest / runner_up)`
    pub multiplier: u64,
    /// e.g. "10x rarer than Gold"
    pub reason: String,
}

/// The config with the best pull rate for a named card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestValue {
    pub name: String,
    pub config: String,
    pub odds: String,
    pub odds_value: f64,
    /// Pull rate as `1:N`
    pub display: String,
}

/// Rarest cards of a product/config, at most `limit`, rarest first
///
/// Every category is considered. Rows whose normalized odds are below
/// `threshold` or missing are skipped.
pub fn find_chase_cards(
    snapshot: &Snapshot,
    product_id: &str,
    config: &str,
    threshold: f64,
    limit: usize,
) -> Vec<ChaseCard> {
    let mut cards: Vec<ChaseCard> = snapshot
        .rows_for(product_id, config)
        .filter_map(|row| {
            let (odds_value, odds) = rated(row)?;
            if odds_value < threshold {
                return None;
            }
            Some(ChaseCard {
                name: row.card_name().to_string(),
                category: row.category.clone(),
                odds,
                odds_value,
                tier: RarityTier::classify(Some(odds_value)),
            })
        })
        .collect();

    cards.sort_by(|a, b| b.odds_value.total_cmp(&a.odds_value));
    cards.truncate(limit);
    cards
}

/// Report the rarest base parallel when it is more than `multiplier` times
/// rarer than the runner-up
///
/// Needs at least two base parallels with positive odds.
pub fn find_sleeper_hit(
    snapshot: &Snapshot,
    product_id: &str,
    config: &str,
    multiplier: f64,
) -> Option<SleeperHit> {
    let mut parallels: Vec<(f64, String, &str)> = snapshot
        .rows_for(product_id, config)
        .filter(|row| row.category == Category::Base)
        .filter_map(|row| {
            let (value, odds) = rated(row)?;
            (value > 0.0).then(|| (value, odds, row.display_name()))
        })
        .collect();

    if parallels.len() < 2 {
        return None;
    }
    parallels.sort_by(|a, b| b.0.total_cmp(&a.0));

    let (rarest_value, rarest_odds, rarest_name) = &parallels[0];
    let (second_value, second_odds, second_name) = &parallels[1];

    if *rarest_value <= second_value * multiplier {
        return None;
    }

    let ratio = (rarest_value / second_value).round() as u64;
    Some(SleeperHit {
        card: rarest_name.to_string(),
        odds: rarest_odds.clone(),
        odds_value: *rarest_value,
        runner_up: second_name.to_string(),
        runner_up_odds: second_odds.clone(),
        multiplier: ratio,
        reason: format!("{ratio}x rarer than {second_name}"),
    })
}

/// The config with the lowest normalized odds for a card or parallel name
///
/// Configs are visited in `configs_available` order and ties keep the first
/// one found.
pub fn find_best_value_config(
    snapshot: &Snapshot,
    product_id: &str,
    name: &str,
) -> Option<BestValue> {
    let mut best: Option<BestValue> = None;

    for config in snapshot.configs_available(product_id) {
        for row in snapshot.rows_for(product_id, &config).filter(|row| row.matches_name(name)) {
            let Some((odds_value, odds)) = rated(row) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| odds_value < b.odds_value) {
                best = Some(BestValue {
                    name: name.to_string(),
                    config: config.clone(),
                    odds,
                    odds_value,
                    display: format!("1:{odds_value}"),
                });
            }
        }
    }

    best
}
