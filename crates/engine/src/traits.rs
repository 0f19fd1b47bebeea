//! Core traits for the similarity engine.
//!
//! Term weighting is a separate stage from pairwise scoring so either can
//! be swapped without touching the ranking logic.

use crate::vector::TermVectors;

/// Turns a corpus of documents into numeric vectors.
///
/// ## Design Note
/// - `Send + Sync` so a weighting scheme can be shared across threads
/// - The vocabulary must come from `documents` alone and the output must
///   contain exactly one vector per document, in the same order. The engine
///   refuses to build from a stage that breaks the count
pub trait TermWeighting: Send + Sync {
    /// Returns the name of this weighting scheme (for logging/debugging)
    fn name(&self) -> &str;

    /// Fit on the corpus and return its vectors
    fn weigh(&self, documents: &[&str]) -> TermVectors;
}
