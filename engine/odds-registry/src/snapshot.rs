//! Immutable product/odds snapshot
//!
//! A snapshot is built off to the side from the three source tables and
//! never mutated afterwards. All catalog queries read from one snapshot.

use crate::types::{
    field, AutographOdds, Category, ConfigSpec, CrossConfigOdds, InsertKind, InsertOdds,
    OddsBreakdown, OddsRow, ParallelOdds, Product, RawRow,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Point-in-time copy of all loaded catalog data
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Products in table order
    products: Vec<Product>,

    /// product_id → index into `products`
    product_index: HashMap<String, usize>,

    /// Odds rows in table order
    odds: Vec<OddsRow>,

    /// product_id → indices into `odds`
    rows_by_product: HashMap<String, Vec<usize>>,

    /// (product_id, config) → indices into `odds`
    rows_by_config: HashMap<(String, String), Vec<usize>>,

    /// product_id → distinct config names in first-seen order
    configs_by_product: HashMap<String, Vec<String>>,

    /// Checklist rows, stored verbatim
    checklist: Vec<RawRow>,

    /// When this snapshot was built
    loaded_at: DateTime<Utc>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            product_index: HashMap::new(),
            odds: Vec::new(),
            rows_by_product: HashMap::new(),
            rows_by_config: HashMap::new(),
            configs_by_product: HashMap::new(),
            checklist: Vec::new(),
            loaded_at: Utc::now(),
        }
    }
}

impl Snapshot {
    /// Build a snapshot from raw tables
    ///
    /// Product rows without a `product_id` are skipped; a repeated id replaces
    /// the earlier row in place. Every product gets a copy of `configs`.
    pub fn build(
        product_rows: &[RawRow],
        odds_rows: &[RawRow],
        checklist: Vec<RawRow>,
        configs: &BTreeMap<String, ConfigSpec>,
    ) -> Self {
        let mut snapshot = Snapshot { checklist, ..Default::default() };

        for row in product_rows {
            let Some(product) = Product::from_raw(row, configs) else {
                debug!("Skipping product row without product_id: {:?}", row);
                continue;
            };
            match snapshot.product_index.get(&product.product_id) {
                Some(&idx) => snapshot.products[idx] = product,
                None => {
                    snapshot.product_index.insert(product.product_id.clone(), snapshot.products.len());
                    snapshot.products.push(product);
                }
            }
        }

        for (idx, raw) in odds_rows.iter().enumerate() {
            let row = OddsRow::from_raw(raw);

            snapshot.rows_by_product.entry(row.product_id.clone()).or_default().push(idx);
            snapshot
                .rows_by_config
                .entry((row.product_id.clone(), row.config.clone()))
                .or_default()
                .push(idx);

            let configs = snapshot.configs_by_product.entry(row.product_id.clone()).or_default();
            if !configs.contains(&row.config) {
                configs.push(row.config.clone());
            }

            snapshot.odds.push(row);
        }

        snapshot
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn odds_count(&self) -> usize {
        self.odds.len()
    }

    pub fn checklist_count(&self) -> usize {
        self.checklist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.odds.is_empty()
    }

    /// All products in table order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.product_index.get(product_id).map(|&idx| &self.products[idx])
    }

    /// Distinct sport names, sorted
    pub fn sports_available(&self) -> Vec<String> {
        let sports: BTreeSet<&str> = self.products.iter().map(|p| p.sport.as_str()).collect();
        sports.into_iter().map(str::to_string).collect()
    }

    /// Distinct years for a sport, newest first (string order, descending)
    pub fn years_for_sport(&self, sport: &str) -> Vec<String> {
        let years: BTreeSet<&str> = self
            .products
            .iter()
            .filter(|p| p.sport == sport)
            .map(|p| p.year.as_str())
            .collect();
        years.into_iter().rev().map(str::to_string).collect()
    }

    /// Products matching both sport and year exactly, in table order
    pub fn products_for(&self, sport: &str, year: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.sport == sport && p.year == year).collect()
    }

    /// Distinct config names with odds rows for a product, in first-seen order
    pub fn configs_available(&self, product_id: &str) -> Vec<String> {
        self.configs_by_product.get(product_id).cloned().unwrap_or_default()
    }

    /// Every odds row of a product
    pub fn rows_for_product<'a>(
        &'a self,
        product_id: &str,
    ) -> impl Iterator<Item = &'a OddsRow> + 'a {
        self.rows_by_product
            .get(product_id)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.odds[idx])
    }

    /// Odds rows of one product/config
    pub fn rows_for<'a>(
        &'a self,
        product_id: &str,
        config: &str,
    ) -> impl Iterator<Item = &'a OddsRow> + 'a {
        self.rows_by_config
            .get(&(product_id.to_string(), config.to_string()))
            .into_iter()
            .flatten()
            .map(move |&idx| &self.odds[idx])
    }

    /// Odds of one product/config split into base parallels, inserts and autographs
    pub fn odds_for(&self, product_id: &str, config: &str) -> OddsBreakdown {
        let mut base_parallels = Vec::new();
        let mut inserts = Vec::new();
        let mut autographs = Vec::new();

        for row in self.rows_for(product_id, config) {
            match row.category {
                Category::Base => base_parallels.push(ParallelOdds {
                    name: row.display_name().to_string(),
                    odds: row.odds_display(),
                    numbered: row.numbered.clone(),
                }),
                Category::Insert => inserts.push(InsertOdds {
                    name: row.card_type.clone(),
                    odds: row.odds_display(),
                    kind: if row.is_ssp() { InsertKind::Ssp } else { InsertKind::Insert },
                    checklist: row.checklist,
                }),
                Category::Auto => autographs.push(AutographOdds {
                    name: row.card_type.clone(),
                    odds: row.odds_display(),
                    checklist: row.checklist,
                }),
                Category::Other(_) => {}
            }
        }

        OddsBreakdown {
            base_parallels: non_empty(base_parallels),
            inserts: non_empty(inserts),
            autographs: non_empty(autographs),
        }
    }

    /// Base parallels of a product across all configs, keyed by parallel name
    pub fn all_parallels_across_configs(&self, product_id: &str) -> Vec<CrossConfigOdds> {
        self.cross_config(product_id, &Category::Base, |row| row.display_name())
    }

    /// Inserts of a product across all configs, keyed by card type
    ///
    /// Unlike base parallels, the `parallel` column is not part of the key:
    /// short-printed inserts all carry `parallel = "SSP"` and would otherwise
    /// collapse into a single entry. The flag survives as `is_ssp`.
    pub fn all_inserts_across_configs(&self, product_id: &str) -> Vec<CrossConfigOdds> {
        self.cross_config(product_id, &Category::Insert, |row| row.card_type.as_str())
    }

    /// Autographs of a product across all configs, keyed by card type
    pub fn all_autographs_across_configs(&self, product_id: &str) -> Vec<CrossConfigOdds> {
        self.cross_config(product_id, &Category::Auto, |row| row.card_type.as_str())
    }

    fn cross_config<F>(&self, product_id: &str, category: &Category, key: F) -> Vec<CrossConfigOdds>
    where
        F: Fn(&OddsRow) -> &str,
    {
        let mut entries: Vec<CrossConfigOdds> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for row in self.rows_for_product(product_id).filter(|row| &row.category == category) {
            let name = key(row);
            let pos = match positions.get(name) {
                Some(&pos) => pos,
                None => {
                    positions.insert(name.to_string(), entries.len());
                    entries.push(CrossConfigOdds {
                        name: name.to_string(),
                        is_ssp: *category == Category::Insert && row.is_ssp(),
                        odds_by_config: BTreeMap::new(),
                    });
                    entries.len() - 1
                }
            };
            // Later rows for the same config win
            entries[pos].odds_by_config.insert(row.config.clone(), row.odds_display());
        }

        entries
    }

    /// All checklist rows
    pub fn checklist(&self) -> &[RawRow] {
        &self.checklist
    }

    /// Checklist rows whose `product_id` column matches
    pub fn checklist_for(&self, product_id: &str) -> Vec<&RawRow> {
        self.checklist.iter().filter(|row| field(row, "product_id") == product_id).collect()
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
