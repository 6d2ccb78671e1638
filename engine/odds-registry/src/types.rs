use crate::odds::{format_odds_value, normalize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One source-table record: column name → trimmed cell value
pub type RawRow = BTreeMap<String, String>;

/// Read a column from a raw row, defaulting to an empty string
pub fn field<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(|v| v.trim()).unwrap_or("")
}

fn optional_field(row: &RawRow, column: &str) -> Option<String> {
    let value = field(row, column);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Leading-integer parse (`"12"`, `"12 cards"`), `None` when no digits lead
fn parse_leading_u32(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// A box configuration (Hobby, Jumbo, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSpec {
    /// Display name (e.g., "Hobby Box")
    pub name: String,

    /// Packs per box
    pub packs: u32,

    /// Cards per pack
    #[serde(rename = "cardsPerPack", alias = "cards_per_pack")]
    pub cards_per_pack: u32,
}

impl ConfigSpec {
    pub fn new(name: impl Into<String>, packs: u32, cards_per_pack: u32) -> Self {
        Self { name: name.into(), packs, cards_per_pack }
    }

    /// Cards in one box; zero when either factor is zero
    pub fn total_cards(&self) -> u32 {
        self.packs.saturating_mul(self.cards_per_pack)
    }
}

/// A card product (e.g., "2024 Topps Chrome Baseball")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product key from the sheet
    pub product_id: String,

    pub name: String,

    pub sport: String,

    /// Release year, kept as text (sorted as a string)
    pub year: String,

    pub brand: String,

    /// Box configurations keyed by config name (e.g., "hobby")
    pub configs: BTreeMap<String, ConfigSpec>,
}

impl Product {
    /// Build a product from a products-table row
    ///
    /// Returns `None` when the row has no `product_id`.
    pub fn from_raw(row: &RawRow, configs: &BTreeMap<String, ConfigSpec>) -> Option<Self> {
        let product_id = field(row, "product_id");
        if product_id.is_empty() {
            return None;
        }

        Some(Self {
            product_id: product_id.to_string(),
            name: field(row, "name").to_string(),
            sport: field(row, "sport").to_string(),
            year: field(row, "year").to_string(),
            brand: field(row, "brand").to_string(),
            configs: configs.clone(),
        })
    }

    pub fn config(&self, config: &str) -> Option<&ConfigSpec> {
        self.configs.get(config)
    }
}

/// Category of an odds row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Base,
    Insert,
    Auto,
    /// Any other category label; kept for product-wide queries
    Other(String),
}

impl Category {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "base" => Category::Base,
            "insert" => Category::Insert,
            "auto" => Category::Auto,
            other => Category::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Base => "base",
            Category::Insert => "insert",
            Category::Auto => "auto",
            Category::Other(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One pull-rate fact: a product, a box config and a named card or parallel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsRow {
    pub product_id: String,

    /// Box config name (e.g., "hobby")
    pub config: String,

    pub category: Category,

    /// Card type (e.g., "Base", "Future Stars")
    pub card_type: String,

    /// Parallel name (e.g., "Gold Refractor"), or "SSP" on short-printed inserts
    pub parallel: Option<String>,

    /// Raw odds text as entered ("1:4", "2:1", "36", "#N/A", ...)
    pub odds: Option<String>,

    /// Print run text (e.g., "/50")
    pub numbered: Option<String>,

    /// Checklist size
    pub checklist: Option<u32>,
}

impl OddsRow {
    /// Build an odds row from an odds-table row.
    /// Missing columns default to empty; unknown columns are ignored.
    pub fn from_raw(row: &RawRow) -> Self {
        Self {
            product_id: field(row, "product_id").to_string(),
            config: field(row, "config").to_string(),
            category: Category::parse(field(row, "category")),
            card_type: field(row, "card_type").to_string(),
            parallel: optional_field(row, "parallel"),
            odds: optional_field(row, "odds"),
            numbered: optional_field(row, "numbered"),
            checklist: parse_leading_u32(field(row, "checklist")),
        }
    }

    /// `parallel` when present, else `card_type`
    pub fn display_name(&self) -> &str {
        self.parallel.as_deref().unwrap_or(&self.card_type)
    }

    /// Name the card is listed under: base rows by parallel, others by card type
    pub fn card_name(&self) -> &str {
        match self.category {
            Category::Base => self.display_name(),
            _ => &self.card_type,
        }
    }

    /// Sentinel-filtered odds text
    pub fn odds_display(&self) -> Option<String> {
        format_odds_value(self.odds.as_deref())
    }

    /// Normalized "1-in-N" value, `None` for missing or malformed odds
    pub fn normalized_odds(&self) -> Option<f64> {
        normalize(self.odds.as_deref())
    }

    /// Short-printed insert marker (exact, case-sensitive)
    pub fn is_ssp(&self) -> bool {
        self.parallel.as_deref() == Some("SSP")
    }

    /// Matches either the parallel or the card type exactly
    pub fn matches_name(&self, name: &str) -> bool {
        self.parallel.as_deref() == Some(name) || self.card_type == name
    }
}

/// Base parallel entry of an odds breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelOdds {
    pub name: String,
    pub odds: Option<String>,
    pub numbered: Option<String>,
}

/// Insert flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertKind {
    Ssp,
    Insert,
}

/// Insert entry of an odds breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertOdds {
    pub name: String,
    pub odds: Option<String>,
    #[serde(rename = "type")]
    pub kind: InsertKind,
    pub checklist: Option<u32>,
}

/// Autograph entry of an odds breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutographOdds {
    pub name: String,
    pub odds: Option<String>,
    pub checklist: Option<u32>,
}

/// Odds of one product/config split by category; empty sections are `None`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OddsBreakdown {
    pub base_parallels: Option<Vec<ParallelOdds>>,
    pub inserts: Option<Vec<InsertOdds>>,
    pub autographs: Option<Vec<AutographOdds>>,
}

/// Odds of one named card across every config it appears in
///
/// Configs without a row for this name have no entry in `odds_by_config`.
/// A row whose odds cell is a sentinel maps to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossConfigOdds {
    pub name: String,

    /// Set for inserts marked "SSP"
    pub is_ssp: bool,

    pub odds_by_config: BTreeMap<String, Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_odds_row_from_raw() {
        let row = OddsRow::from_raw(&raw(&[
            ("product_id", "topps-chrome-24"),
            ("config", "hobby"),
            ("category", "insert"),
            ("card_type", "Future Stars"),
            ("parallel", "SSP"),
            ("odds", " 1:24 "),
            ("checklist", "25 cards"),
            ("unknown_column", "ignored"),
        ]));

        assert_eq!(row.category, Category::Insert);
        assert_eq!(row.odds.as_deref(), Some("1:24"));
        assert_eq!(row.checklist, Some(25));
        assert!(row.is_ssp());
        assert_eq!(row.display_name(), "SSP");
        assert_eq!(row.numbered, None);
        assert_eq!(row.normalized_odds(), Some(24.0));
    }

    #[test]
    fn test_missing_columns_default() {
        let row = OddsRow::from_raw(&raw(&[("product_id", "p1")]));
        assert_eq!(row.config, "");
        assert_eq!(row.category, Category::Other(String::new()));
        assert_eq!(row.parallel, None);
        assert_eq!(row.odds, None);
        assert_eq!(row.checklist, None);
        assert_eq!(row.normalized_odds(), None);
    }

    #[test]
    fn test_ssp_is_case_sensitive() {
        let row = OddsRow::from_raw(&raw(&[("parallel", "ssp"), ("card_type", "Insert")]));
        assert!(!row.is_ssp());
    }

    #[test]
    fn test_product_requires_id() {
        let configs = BTreeMap::new();
        assert!(Product::from_raw(&raw(&[("name", "No Id")]), &configs).is_none());

        let product = Product::from_raw(
            &raw(&[("product_id", "p1"), ("sport", "Baseball"), ("year", "2024")]),
            &configs,
        )
        .unwrap();
        assert_eq!(product.sport, "Baseball");
        assert_eq!(product.brand, "");
    }

    #[test]
    fn test_serialized_field_names() {
        let spec = serde_json::to_value(ConfigSpec::new("Hobby Box", 20, 4)).unwrap();
        assert_eq!(spec["cardsPerPack"], 4);

        let insert = InsertOdds {
            name: "Future Stars".to_string(),
            odds: Some("1:8".to_string()),
            kind: InsertKind::Ssp,
            checklist: None,
        };
        let value = serde_json::to_value(&insert).unwrap();
        assert_eq!(value["type"], "ssp");

        let parsed: ConfigSpec =
            serde_json::from_str(r#"{"name":"Jumbo Box","packs":12,"cards_per_pack":13}"#).unwrap();
        assert_eq!(parsed.total_cards(), 156);
    }

    #[test]
    fn test_total_cards() {
        assert_eq!(ConfigSpec::new("Hobby Box", 20, 4).total_cards(), 80);
        assert_eq!(ConfigSpec::new("Empty", 0, 4).total_cards(), 0);
    }
}
