use crate::config::RegistryConfig;
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::source::{TableKind, TableSource};
use crate::types::{CrossConfigOdds, OddsBreakdown, Product, RawRow};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Odds Registry - read-only catalog of card products and their pull rates
///
/// The registry owns the current [`Snapshot`]. Loading builds a new snapshot
/// off to the side and swaps it in only once every table is in hand, so a
/// reader always sees either the old or the new data in full.
pub struct OddsRegistry {
    config: RegistryConfig,

    /// Currently published snapshot
    snapshot: RwLock<Arc<Snapshot>>,
}

/// Row counts of a published snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub products: usize,
    pub odds_rows: usize,
    pub checklist_rows: usize,
    /// When the published snapshot was built
    pub loaded_at: DateTime<Utc>,
}

impl OddsRegistry {
    /// Create a new empty registry with the standard box catalog
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a new empty registry with a custom box catalog
    pub fn with_config(config: RegistryConfig) -> Self {
        Self { config, snapshot: RwLock::new(Arc::new(Snapshot::default())) }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Current snapshot; stays valid even if a reload publishes a new one
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    /// Replace the snapshot with one built from the given tables
    pub fn load(
        &self,
        products: Vec<RawRow>,
        odds: Vec<RawRow>,
        checklist: Vec<RawRow>,
    ) -> LoadSummary {
        let snapshot = Snapshot::build(&products, &odds, checklist, &self.config.configs);
        let summary = LoadSummary {
            products: snapshot.product_count(),
            odds_rows: snapshot.odds_count(),
            checklist_rows: snapshot.checklist_count(),
            loaded_at: snapshot.loaded_at(),
        };

        *self.snapshot.write() = Arc::new(snapshot);

        info!(
            "Published snapshot: {} products, {} odds rows, {} checklist rows (loaded at {})",
            summary.products, summary.odds_rows, summary.checklist_rows, summary.loaded_at
        );
        summary
    }

    /// Fetch all three tables concurrently and publish them as one snapshot
    ///
    /// If any table fails the previous snapshot stays in place and the
    /// failure is returned.
    pub async fn load_from_source(&self, source: &dyn TableSource) -> Result<LoadSummary> {
        info!("Loading odds tables");

        let fetched = tokio::try_join!(
            source.fetch(TableKind::Products),
            source.fetch(TableKind::Odds),
            source.fetch(TableKind::Checklist),
        );

        match fetched {
            Ok((products, odds, checklist)) => Ok(self.load(products, odds, checklist)),
            Err(e) => {
                warn!("Load failed, keeping previous snapshot: {}", e);
                Err(e)
            }
        }
    }

    /// Sorted sport names
    pub fn sports_available(&self) -> Vec<String> {
        self.snapshot().sports_available()
    }

    /// Years for a sport, newest first
    pub fn years_for_sport(&self, sport: &str) -> Vec<String> {
        self.snapshot().years_for_sport(sport)
    }

    /// Products matching sport and year
    pub fn products_for(&self, sport: &str, year: &str) -> Vec<Product> {
        self.snapshot().products_for(sport, year).into_iter().cloned().collect()
    }

    pub fn product(&self, product_id: &str) -> Option<Product> {
        self.snapshot().product(product_id).cloned()
    }

    /// Config names with odds rows for a product
    pub fn configs_available(&self, product_id: &str) -> Vec<String> {
        self.snapshot().configs_available(product_id)
    }

    /// Odds of one product/config split by category
    pub fn odds_for(&self, product_id: &str, config: &str) -> OddsBreakdown {
        self.snapshot().odds_for(product_id, config)
    }

    pub fn all_parallels_across_configs(&self, product_id: &str) -> Vec<CrossConfigOdds> {
        self.snapshot().all_parallels_across_configs(product_id)
    }

    pub fn all_inserts_across_configs(&self, product_id: &str) -> Vec<CrossConfigOdds> {
        self.snapshot().all_inserts_across_configs(product_id)
    }

    pub fn all_autographs_across_configs(&self, product_id: &str) -> Vec<CrossConfigOdds> {
        self.snapshot().all_autographs_across_configs(product_id)
    }

    /// Check if nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl Default for OddsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    /// In-memory source; tables listed in `failing` return a load failure
    struct MemorySource {
        tables: HashMap<TableKind, Vec<RawRow>>,
        failing: Vec<TableKind>,
    }

    impl MemorySource {
        fn new(sport: &str) -> Self {
            let mut tables = HashMap::new();
            tables.insert(
                TableKind::Products,
                vec![raw(&[("product_id", "p1"), ("sport", sport), ("year", "2024")])],
            );
            tables.insert(
                TableKind::Odds,
                vec![raw(&[
                    ("product_id", "p1"),
                    ("config", "hobby"),
                    ("category", "base"),
                    ("card_type", "Base"),
                    ("parallel", "Refractor"),
                    ("odds", "1:3"),
                ])],
            );
            tables.insert(TableKind::Checklist, Vec::new());
            Self { tables, failing: Vec::new() }
        }

        fn failing_on(mut self, kind: TableKind) -> Self {
            self.failing.push(kind);
            self
        }
    }

    #[async_trait]
    impl TableSource for MemorySource {
        async fn fetch(&self, kind: TableKind) -> Result<Vec<RawRow>> {
            if self.failing.contains(&kind) {
                return Err(RegistryError::load_failure(kind, "connection reset"));
            }
            Ok(self.tables.get(&kind).cloned().unwrap_or_default())
        }
    }

    #[test]
    fn test_registry_starts_empty() {
        let registry = OddsRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.sports_available().is_empty());
        assert!(registry.configs_available("p1").is_empty());
        assert_eq!(registry.odds_for("p1", "hobby"), OddsBreakdown::default());
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let registry = OddsRegistry::new();
        let summary = registry.load_from_source(&MemorySource::new("Baseball")).await.unwrap();

        assert_eq!(
            summary,
            LoadSummary {
                products: 1,
                odds_rows: 1,
                checklist_rows: 0,
                loaded_at: registry.snapshot().loaded_at(),
            }
        );
        assert_eq!(registry.sports_available(), vec!["Baseball"]);
        assert_eq!(registry.configs_available("p1"), vec!["hobby"]);
        assert_eq!(registry.product("p1").unwrap().configs["hobby"].total_cards(), 80);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_snapshot() {
        let registry = OddsRegistry::new();
        registry.load_from_source(&MemorySource::new("Baseball")).await.unwrap();
        let before = registry.sports_available();
        let loaded_at = registry.snapshot().loaded_at();

        let source = MemorySource::new("Hockey").failing_on(TableKind::Odds);
        let result = registry.load_from_source(&source).await;

        assert!(matches!(result, Err(RegistryError::LoadFailure { table: TableKind::Odds, .. })));
        assert_eq!(registry.sports_available(), before);
        assert_eq!(registry.snapshot().loaded_at(), loaded_at);
    }

    #[tokio::test]
    async fn test_failed_first_load_leaves_registry_empty() {
        let registry = OddsRegistry::new();
        let source = MemorySource::new("Baseball").failing_on(TableKind::Checklist);
        assert!(registry.load_from_source(&source).await.is_err());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_reload_replaces_wholesale() {
        let registry = OddsRegistry::new();
        registry.load_from_source(&MemorySource::new("Baseball")).await.unwrap();
        let held = registry.snapshot();

        let summary = registry.load_from_source(&MemorySource::new("Football")).await.unwrap();

        assert_eq!(registry.sports_available(), vec!["Football"]);
        assert!(summary.loaded_at >= held.loaded_at());
        // A reader holding the old snapshot still sees it in full
        assert_eq!(held.sports_available(), vec!["Baseball"]);
    }
}
