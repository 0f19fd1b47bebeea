//! Error types for the similarity engine.

use thiserror::Error;

/// Ways the engine can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Construction attempted on a catalog with zero movies
    #[error("Cannot build a similarity engine from an empty catalog")]
    EmptyCatalog,

    /// A custom weighting stage returned a vector count that differs from
    /// the number of catalog rows
    #[error("Weighting '{weighting}' produced {found} vectors for {expected} documents")]
    WeightingMismatch {
        weighting: String,
        expected: usize,
        found: usize,
    },

    /// Query title does not match any movie title exactly
    #[error("Title '{title}' not found in catalog")]
    TitleNotFound { title: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
