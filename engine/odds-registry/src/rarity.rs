//! Rarity classification
//!
//! Two independent scales are derived from normalized odds:
//! the four-step [`RarityTier`] used for grouping and ranking, and the
//! finer six-step [`ColorBand`] used for per-cell coloring. They use different
//! breakpoints and are never blended.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (inclusive) of the Common tier
pub const COMMON_MAX: f64 = 10.0;

/// Upper bound (inclusive) of the Uncommon tier
pub const UNCOMMON_MAX: f64 = 50.0;

/// Upper bound (inclusive) of the Rare tier; anything above is Chase
pub const RARE_MAX: f64 = 200.0;

/// Four fixed rarity buckets, ordered Common < Uncommon < Rare < Chase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
    Chase,
}

impl RarityTier {
    /// All tiers from most common to rarest
    pub const ALL: [RarityTier; 4] =
        [RarityTier::Common, RarityTier::Uncommon, RarityTier::Rare, RarityTier::Chase];

    /// Classify a normalized odds value
    ///
    /// Boundaries are inclusive in the lower tier: 10 is Common, 50 is
    /// Uncommon, 200 is Rare. Missing odds and values below 1 are Common.
    pub fn classify(normalized: Option<f64>) -> Self {
        match normalized {
            None => RarityTier::Common,
            Some(v) if v <= COMMON_MAX => RarityTier::Common,
            Some(v) if v <= UNCOMMON_MAX => RarityTier::Uncommon,
            Some(v) if v <= RARE_MAX => RarityTier::Rare,
            Some(_) => RarityTier::Chase,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Uncommon => "Uncommon",
            RarityTier::Rare => "Rare",
            RarityTier::Chase => "Chase",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RarityTier::Common => "🟢",
            RarityTier::Uncommon => "🔵",
            RarityTier::Rare => "🟣",
            RarityTier::Chase => "🟠",
        }
    }

    /// Palette name for the tier
    pub fn color(&self) -> &'static str {
        match self {
            RarityTier::Common => "emerald",
            RarityTier::Uncommon => "blue",
            RarityTier::Rare => "violet",
            RarityTier::Chase => "orange",
        }
    }

    /// Human readable odds range, e.g. `1:11-1:50`
    pub fn range_label(&self) -> &'static str {
        match self {
            RarityTier::Common => "1:1-1:10",
            RarityTier::Uncommon => "1:11-1:50",
            RarityTier::Rare => "1:51-1:200",
            RarityTier::Chase => "1:200+",
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify a normalized odds value into a [`RarityTier`]
pub fn classify(normalized: Option<f64>) -> RarityTier {
    RarityTier::classify(normalized)
}

/// Six-step coloring scale for individual odds cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Emerald,
    Blue,
    Violet,
    Amber,
    Orange,
    Red,
}

impl ColorBand {
    /// Breakpoints at 1, 20, 100, 500, 2000 and 10000.
    /// Missing odds and anything better than 1-in-1 are Emerald.
    pub fn for_odds(normalized: Option<f64>) -> Self {
        match normalized {
            None => ColorBand::Emerald,
            Some(v) if v < 1.0 => ColorBand::Emerald,
            Some(v) if v <= 20.0 => ColorBand::Emerald,
            Some(v) if v <= 100.0 => ColorBand::Blue,
            Some(v) if v <= 500.0 => ColorBand::Violet,
            Some(v) if v <= 2000.0 => ColorBand::Amber,
            Some(v) if v <= 10000.0 => ColorBand::Orange,
            Some(_) => ColorBand::Red,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorBand::Emerald => "emerald",
            ColorBand::Blue => "blue",
            ColorBand::Violet => "violet",
            ColorBand::Amber => "amber",
            ColorBand::Orange => "orange",
            ColorBand::Red => "red",
        }
    }

    /// Foreground class token, e.g. `text-violet-400`
    pub fn text_class(&self) -> String {
        format!("text-{}-400", self.name())
    }

    /// Background class token, e.g. `bg-violet-500`
    pub fn bg_class(&self) -> String {
        format!("bg-{}-500", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odds::normalize_str;

    #[test]
    fn test_tier_boundaries_inclusive_in_lower_tier() {
        assert_eq!(classify(None), RarityTier::Common);
        assert_eq!(classify(Some(0.25)), RarityTier::Common);
        assert_eq!(classify(Some(10.0)), RarityTier::Common);
        assert_eq!(classify(Some(10.0001)), RarityTier::Uncommon);
        assert_eq!(classify(Some(50.0)), RarityTier::Uncommon);
        assert_eq!(classify(Some(50.5)), RarityTier::Rare);
        assert_eq!(classify(Some(200.0)), RarityTier::Rare);
        assert_eq!(classify(Some(200.01)), RarityTier::Chase);
    }

    #[test]
    fn test_tier_is_monotonic() {
        let mut previous = RarityTier::Common;
        let mut v = 0.0;
        while v < 5000.0 {
            let tier = classify(Some(v));
            assert!(tier >= previous, "tier dropped at {v}");
            previous = tier;
            v += 0.5;
        }
        assert_eq!(previous, RarityTier::Chase);
    }

    #[test]
    fn test_tier_from_raw_odds() {
        assert_eq!(classify(normalize_str("4:1")), RarityTier::Common);
        assert_eq!(classify(normalize_str("1:24")), RarityTier::Uncommon);
        assert_eq!(classify(normalize_str("1:150")), RarityTier::Rare);
        assert_eq!(classify(normalize_str("1:1000")), RarityTier::Chase);
        assert_eq!(classify(normalize_str("#N/A")), RarityTier::Common);
    }

    #[test]
    fn test_tier_presentation() {
        assert_eq!(RarityTier::Chase.emoji(), "🟠");
        assert_eq!(RarityTier::Rare.color(), "violet");
        assert_eq!(RarityTier::Uncommon.to_string(), "Uncommon");
    }

    #[test]
    fn test_color_bands() {
        assert_eq!(ColorBand::for_odds(None), ColorBand::Emerald);
        assert_eq!(ColorBand::for_odds(Some(0.5)), ColorBand::Emerald);
        assert_eq!(ColorBand::for_odds(Some(20.0)), ColorBand::Emerald);
        assert_eq!(ColorBand::for_odds(Some(21.0)), ColorBand::Blue);
        assert_eq!(ColorBand::for_odds(Some(100.0)), ColorBand::Blue);
        assert_eq!(ColorBand::for_odds(Some(500.0)), ColorBand::Violet);
        assert_eq!(ColorBand::for_odds(Some(2000.0)), ColorBand::Amber);
        assert_eq!(ColorBand::for_odds(Some(10000.0)), ColorBand::Orange);
        assert_eq!(ColorBand::for_odds(Some(10000.5)), ColorBand::Red);
    }

    #[test]
    fn test_color_band_differs_from_tier_scale() {
        // 15 is Uncommon as a tier but still Emerald as a cell color
        assert_eq!(classify(Some(15.0)), RarityTier::Uncommon);
        assert_eq!(ColorBand::for_odds(Some(15.0)), ColorBand::Emerald);
        assert_eq!(ColorBand::Violet.text_class(), "text-violet-400");
        assert_eq!(ColorBand::Red.bg_class(), "bg-red-500");
    }
}
