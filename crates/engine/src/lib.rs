//! Content-based similarity engine for movie catalogs.
//!
//! This crate provides:
//! - TermWeighting trait and a TF-IDF implementation
//! - SimilarityMatrix for dense pairwise cosine scores
//! - SimilarityEngine for title lookup and top-N ranking
//!
//! ## Architecture
//! An engine is built in stages:
//! 1. Each movie's combined text is tokenized (stop words dropped)
//! 2. A TermWeighting stage turns the corpus into sparse vectors
//! 3. All pairwise cosine similarities are computed in parallel
//! 4. Titles are indexed to their first catalog position
//!
//! ## Example Usage
//! ```ignore
//! use catalog::normalize;
//! use engine::SimilarityEngine;
//!
//! let table = normalize(records);
//! let engine = SimilarityEngine::new(table)?;
//!
//! for hit in engine.recommend("Alien", 5)? {
//!     println!("{} ({:.3})", hit.movie.title, hit.score);
//! }
//! ```

pub mod error;
pub mod recommender;
pub mod similarity;
pub mod tokenize;
pub mod traits;
pub mod vector;
pub mod vectorizer;

// Re-export main types
pub use error::{EngineError, Result};
pub use recommender::{ScoredMovie, SimilarityEngine};
pub use similarity::{SimilarityMatrix, cosine};
pub use traits::TermWeighting;
pub use vector::{SparseVector, TermVectors};
pub use vectorizer::{DEFAULT_MAX_FEATURES, TfidfVectorizer};
