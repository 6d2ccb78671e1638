//! Source tables
//!
//! The registry consumes three tables (products, odds, checklist) as ordered
//! sequences of string-keyed rows. Where they come from is up to the
//! [`TableSource`] implementation; [`CsvDirSource`] reads CSV exports from a
//! local directory.

use crate::error::{RegistryError, Result};
use crate::types::RawRow;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The three tables that make up a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Products,
    Odds,
    Checklist,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::Products, TableKind::Odds, TableKind::Checklist];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Products => "products",
            TableKind::Odds => "odds",
            TableKind::Checklist => "checklist",
        }
    }

    /// Conventional export file name (e.g., `odds.csv`)
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supplier of raw source tables
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch every row of one table
    async fn fetch(&self, kind: TableKind) -> Result<Vec<RawRow>>;
}

/// Reads `products.csv`, `odds.csv` and `checklist.csv` from a directory
#[derive(Debug, Clone)]
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn path_for(&self, kind: TableKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

#[async_trait]
impl TableSource for CsvDirSource {
    async fn fetch(&self, kind: TableKind) -> Result<Vec<RawRow>> {
        let path = self.path_for(kind);
        debug!("Reading {} table from {:?}", kind, path);

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| RegistryError::load_failure(kind, format!("{}: {e}", path.display())))?;

        parse_csv_table(&text).map_err(|e| RegistryError::load_failure(kind, e))
    }
}

/// Parse CSV text into rows keyed by the (trimmed) header names
///
/// Quoted fields follow RFC 4180 (`""` escapes a quote). Short records are
/// padded with empty strings, extra cells are dropped and blank lines skipped.
pub fn parse_csv_table(text: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let row: RawRow = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.is_empty())
            .map(|(i, header)| {
                (header.clone(), record.get(i).map(|v| v.trim().to_string()).unwrap_or_default())
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_and_short_rows() {
        let text = "product_id,name ,brand\n\
                    p1,\"Chrome, Update\",Topps\n\
                    \n\
                    p2,\"Say \"\"Hi\"\"\"\n";
        let rows = parse_csv_table(text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Chrome, Update");
        assert_eq!(rows[0]["brand"], "Topps");
        assert_eq!(rows[1]["name"], "Say \"Hi\"");
        assert_eq!(rows[1]["brand"], "");
    }

    #[test]
    fn test_parse_trims_cells() {
        let rows = parse_csv_table("odds,config\n  1:4 , hobby \n").unwrap();
        assert_eq!(rows[0]["odds"], "1:4");
        assert_eq!(rows[0]["config"], "hobby");
    }

    #[test]
    fn test_header_only() {
        assert!(parse_csv_table("product_id,name\n").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_csv_dir_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("products.csv"), "product_id,sport\np1,Baseball\n")
            .unwrap();

        let source = CsvDirSource::new(dir.path());
        let rows = source.fetch(TableKind::Products).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["sport"], "Baseball");

        let missing = source.fetch(TableKind::Odds).await;
        assert!(matches!(
            missing,
            Err(RegistryError::LoadFailure { table: TableKind::Odds, .. })
        ));
    }
}
