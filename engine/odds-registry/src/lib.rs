//! Odds Registry - card product pull rates as comparable numbers
//!
//! This crate owns the in-memory catalog of products and odds rows loaded
//! from the odds sheet, the normalizer that turns free-text odds into a
//! "1-in-N" value, and the rarity scales derived from it.

pub mod config;
pub mod error;
pub mod odds;
pub mod rarity;
pub mod registry;
pub mod snapshot;
pub mod source;
pub mod types;

pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use odds::{format_odds_value, normalize, normalize_str};
pub use rarity::{classify, ColorBand, RarityTier};
pub use registry::{LoadSummary, OddsRegistry};
pub use snapshot::Snapshot;
pub use source::{parse_csv_table, CsvDirSource, TableKind, TableSource};
pub use types::{
    AutographOdds, Category, ConfigSpec, CrossConfigOdds, InsertKind, InsertOdds, OddsBreakdown,
    OddsRow, ParallelOdds, Product, RawRow,
};
