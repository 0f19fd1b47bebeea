//! Error types for the catalog crate.
//!
//! Only the snapshot loader can fail. Normalization never does: missing
//! fields degrade to empty values instead of raising.

use thiserror::Error;

/// Errors that can occur while loading a catalog snapshot
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Snapshot file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the snapshot
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Snapshot content is not a recognised record layout
    #[error("Parse error in {source_name}: {reason}")]
    ParseError { source_name: String, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
