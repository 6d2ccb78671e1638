//! Error types for the odds registry

use crate::source::TableKind;
use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur while loading or configuring the registry
///
/// Lookups never fail: unknown products, configs and sports resolve to
/// empty collections or `None`.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// One of the source tables could not be fetched or parsed.
    /// The previously published snapshot stays authoritative.
    #[error("Failed to load {table} table: {reason}")]
    LoadFailure { table: TableKind, reason: String },

    /// I/O errors while reading local tables or config files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RegistryError {
    /// Wrap any error as a load failure of the given table
    pub fn load_failure(table: TableKind, reason: impl std::fmt::Display) -> Self {
        RegistryError::LoadFailure { table, reason: reason.to_string() }
    }
}
