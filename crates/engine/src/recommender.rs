//! Similarity Engine - content-based nearest neighbours by title
//!
//! ## Lifecycle
//! 1. Build once from a [`CatalogTable`]: weigh terms, score all pairs,
//!    index titles
//! 2. Answer any number of read-only queries
//!
//! There is no incremental update. A changed catalog means a new engine.
//!
//! ## Duplicate titles
//! Lookup by title resolves to the first position holding that title. The
//! mapping is built once at construction, so the choice never depends on
//! hash iteration order.

use crate::error::{EngineError, Result};
use crate::similarity::SimilarityMatrix;
use crate::traits::TermWeighting;
use crate::vectorizer::TfidfVectorizer;
use catalog::{CatalogTable, NormalizedMovie, Position};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// One ranked result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMovie<'a> {
    /// Position of the movie in the catalog
    pub position: Position,
    pub movie: &'a NormalizedMovie,
    pub score: f64,
}

/// Immutable similarity engine over one catalog generation
#[derive(Debug)]
pub struct SimilarityEngine {
    table: CatalogTable,
    matrix: SimilarityMatrix,
    /// Title -> first position holding it
    title_index: HashMap<String, Position>,
    vocabulary_len: usize,
}

impl SimilarityEngine {
    /// Build an engine with the default TF-IDF weighting.
    ///
    /// Fails with [`EngineError::EmptyCatalog`] on a table with no rows.
    pub fn new(table: CatalogTable) -> Result<Self> {
        Self::with_weighting(table, &TfidfVectorizer::new())
    }

    /// Build an engine with a custom term-weighting stage.
    ///
    /// Fails with [`EngineError::WeightingMismatch`] if the stage does not
    /// return exactly one vector per catalog row.
    pub fn with_weighting(table: CatalogTable, weighting: &dyn TermWeighting) -> Result<Self> {
        if table.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        let start = Instant::now();

        let documents: Vec<&str> = table.combined_texts().collect();
        let term_vectors = weighting.weigh(&documents);
        if term_vectors.vectors.len() != table.len() {
            return Err(EngineError::WeightingMismatch {
                weighting: weighting.name().to_string(),
                expected: table.len(),
                found: term_vectors.vectors.len(),
            });
        }
        let matrix = SimilarityMatrix::from_vectors(&term_vectors.vectors);

        let mut title_index = HashMap::with_capacity(table.len());
        for (position, title) in table.titles().enumerate() {
            title_index.entry(title.to_string()).or_insert(position);
        }

        info!(
            "Built similarity engine: {} movies, {} terms ({}) in {:.2?}",
            table.len(),
            term_vectors.vocabulary.len(),
            weighting.name(),
            start.elapsed()
        );

        Ok(Self {
            vocabulary_len: term_vectors.vocabulary.len(),
            table,
            matrix,
            title_index,
        })
    }

    /// Movies most similar to `title`, best first.
    ///
    /// Results are sorted by descending score, then ascending catalog
    /// position. The queried movie itself is never included. At most
    /// `top_n` results are returned; fewer if the catalog is smaller.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str, top_n: usize) -> Result<Vec<ScoredMovie<'_>>> {
        let query = self
            .position_of(title)
            .ok_or_else(|| EngineError::TitleNotFound {
                title: title.to_string(),
            })?;

        // Matrix rows and catalog rows correspond one to one
        let row = self.matrix.row(query).unwrap_or_default();
        let movies = self.table.movies();

        let mut ranked: Vec<(Position, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(position, _)| position != query)
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(top_n);

        debug!(
            "Ranked {} neighbours for '{}' at position {}",
            ranked.len(),
            title,
            query
        );

        Ok(ranked
            .into_iter()
            .map(|(position, score)| ScoredMovie {
                position,
                movie: &movies[position],
                score,
            })
            .collect())
    }

    /// All titles in catalog order, duplicates included
    pub fn all_titles(&self) -> Vec<&str> {
        self.table.titles().collect()
    }

    /// First position holding exactly this title
    pub fn position_of(&self, title: &str) -> Option<Position> {
        self.title_index.get(title).copied()
    }

    pub fn catalog(&self) -> &CatalogTable {
        &self.table
    }

    pub fn similarity_matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    /// Number of terms kept after the vocabulary cap
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary_len
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
