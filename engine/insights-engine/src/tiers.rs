//! # Rarity Tiers
//!
//! Tier histogram and the rarity ladder (bubble chart data).

use crate::config::BubbleConfig;
use crate::rated;
use odds_registry::{Category, RarityTier, Snapshot};
use serde::{Deserialize, Serialize};

/// A card placed in a tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredCard {
    pub name: String,
    pub category: Category,
    pub odds: String,
    pub odds_value: f64,
}

/// Cards of one product/config grouped by rarity tier, in row order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierGroups {
    pub common: Vec<TieredCard>,
    pub uncommon: Vec<TieredCard>,
    pub rare: Vec<TieredCard>,
    pub chase: Vec<TieredCard>,
}

/// Number of cards per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub common: usize,
    pub uncommon: usize,
    pub rare: usize,
    pub chase: usize,
}

impl TierGroups {
    pub fn get(&self, tier: RarityTier) -> &[TieredCard] {
        match tier {
            RarityTier::Common => &self.common,
            RarityTier::Uncommon => &self.uncommon,
            RarityTier::Rare => &self.rare,
            RarityTier::Chase => &self.chase,
        }
    }

    fn get_mut(&mut self, tier: RarityTier) -> &mut Vec<TieredCard> {
        match tier {
            RarityTier::Common => &mut self.common,
            RarityTier::Uncommon => &mut self.uncommon,
            RarityTier::Rare => &mut self.rare,
            RarityTier::Chase => &mut self.chase,
        }
    }

    pub fn counts(&self) -> TierCounts {
        TierCounts {
            common: self.common.len(),
            uncommon: self.uncommon.len(),
            rare: self.rare.len(),
            chase: self.chase.len(),
        }
    }

    pub fn total(&self) -> usize {
        RarityTier::ALL.iter().map(|&tier| self.get(tier).len()).sum()
    }
}

/// Group every row with usable odds into the four rarity tiers
pub fn group_by_rarity_tier(snapshot: &Snapshot, product_id: &str, config: &str) -> TierGroups {
    let mut groups = TierGroups::default();

    for row in snapshot.rows_for(product_id, config) {
        let Some((odds_value, odds)) = rated(row) else {
            continue;
        };
        groups.get_mut(RarityTier::classify(Some(odds_value))).push(TieredCard {
            name: row.card_name().to_string(),
            category: row.category.clone(),
            odds,
            odds_value,
        });
    }

    groups
}

/// One base parallel on the rarity ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LadderRung {
    pub name: String,
    pub odds: String,
    pub odds_value: f64,
    pub tier: RarityTier,
    /// Tier color of the bubble
    pub color: String,
    /// Bubble radius: easier pulls get bigger bubbles
    pub radius: f64,
}

/// Bubble radius on a log scale relative to the rarest value
pub fn bubble_radius(odds_value: f64, max_value: f64, bubbles: &BubbleConfig) -> f64 {
    let log_max = (max_value + 1.0).ln();
    if log_max <= 0.0 {
        return bubbles.max_radius;
    }
    let log_odds = (odds_value + 1.0).ln();
    bubbles.max_radius - (log_odds / log_max) * (bubbles.max_radius - bubbles.min_radius)
}

/// Base parallels with usable odds from most common to rarest
pub fn rarity_ladder(
    snapshot: &Snapshot,
    product_id: &str,
    config: &str,
    bubbles: &BubbleConfig,
) -> Vec<LadderRung> {
    let mut rated_rows: Vec<(f64, String, String)> = snapshot
        .rows_for(product_id, config)
        .filter(|row| row.category == Category::Base)
        .filter_map(|row| {
            let (value, odds) = rated(row)?;
            Some((value, odds, row.display_name().to_string()))
        })
        .collect();
    rated_rows.sort_by(|a, b| a.0.total_cmp(&b.0));

    let max_value = rated_rows.last().map(|r| r.0).unwrap_or(0.0);

    rated_rows
        .into_iter()
        .map(|(odds_value, odds, name)| {
            let tier = RarityTier::classify(Some(odds_value));
            LadderRung {
                name,
                odds,
                odds_value,
                tier,
                color: tier.color().to_string(),
                radius: bubble_radius(odds_value, max_value, bubbles),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_snapshot, odds_row, PRODUCT};

    #[test]
    fn test_group_by_rarity_tier() {
        let snapshot = build_snapshot(vec![
            odds_row("hobby", "base", "Base", "Refractor", "1:10"),
            odds_row("hobby", "base", "Base", "Purple", "4:1"),
            odds_row("hobby", "base", "Base", "Blue", "1:11"),
            odds_row("hobby", "base", "Base", "Gold", "1:50"),
            odds_row("hobby", "insert", "Dynasty", "", "1:200"),
            odds_row("hobby", "auto", "Rookie Auto", "", "1:201"),
            odds_row("hobby", "auto", "Dual Auto", "", "undefined"),
        ]);

        let groups = group_by_rarity_tier(&snapshot, PRODUCT, "hobby");
        assert_eq!(groups.counts(), TierCounts { common: 2, uncommon: 2, rare: 1, chase: 1 });
        assert_eq!(groups.total(), 6);
        assert_eq!(groups.common[0].name, "Refractor");
        assert_eq!(groups.common[1].name, "Purple");
        assert_eq!(groups.get(RarityTier::Rare)[0].category, Category::Insert);
        assert_eq!(groups.chase[0].name, "Rookie Auto");
    }

    #[test]
    fn test_group_unknown_product() {
        let snapshot = build_snapshot(vec![]);
        assert_eq!(group_by_rarity_tier(&snapshot, "unknown", "hobby"), TierGroups::default());
    }

    #[test]
    fn test_bubble_radius() {
        let bubbles = BubbleConfig::default();
        assert!((bubble_radius(999.0, 999.0, &bubbles) - 20.0).abs() < 1e-9);
        assert!((bubble_radius(0.0, 999.0, &bubbles) - 70.0).abs() < 1e-9);
        assert_eq!(bubble_radius(0.0, 0.0, &bubbles), 70.0);

        let mid = bubble_radius(31.0, 1023.0, &bubbles);
        assert!((mid - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_rarity_ladder_order() {
        let snapshot = build_snapshot(vec![
            odds_row("hobby", "base", "Base", "Gold", "1:50"),
            odds_row("hobby", "base", "Base", "Superfractor", "1:4000"),
            odds_row("hobby", "base", "Base", "Refractor", "1:3"),
            odds_row("hobby", "insert", "Dynasty", "", "1:200"),
        ]);

        let ladder = rarity_ladder(&snapshot, PRODUCT, "hobby", &BubbleConfig::default());
        let names: Vec<&str> = ladder.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Refractor", "Gold", "Superfractor"]);

        assert_eq!(ladder[0].tier, RarityTier::Common);
        assert_eq!(ladder[2].tier, RarityTier::Chase);
        assert_eq!(ladder[0].color, "emerald");
        assert_eq!(ladder[1].color, "blue");
        assert_eq!(ladder[2].color, "orange");
        assert!(ladder[0].radius > ladder[1].radius);
        assert!((ladder[2].radius - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_ladder_colored_by_tier() {
        // 1:300 is a Chase tier card even though its cell band is violet
        let snapshot = build_snapshot(vec![odds_row("hobby", "base", "Base", "Orange", "1:300")]);

        let ladder = rarity_ladder(&snapshot, PRODUCT, "hobby", &BubbleConfig::default());
        assert_eq!(ladder[0].tier, RarityTier::Chase);
        assert_eq!(ladder[0].color, RarityTier::Chase.color());
    }
}
