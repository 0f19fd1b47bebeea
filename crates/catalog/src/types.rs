//! Core domain types for the movie catalog.
//!
//! Raw records arrive from an external catalog (TMDB pages or a JSON
//! snapshot) with almost every field optional. The normalizer turns them
//! into [`NormalizedMovie`] rows held in an ordered [`CatalogTable`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a movie in the remote catalog
pub type MovieId = u64;

/// Numeric genre identifier as published by the remote catalog
pub type GenreId = u32;

/// Position of a movie inside a [`CatalogTable`] (0..N-1, insertion order)
pub type Position = usize;

// =============================================================================
// Raw Input
// =============================================================================

/// A movie as delivered by the external catalog source.
///
/// Only `id` is guaranteed. Every other field may be absent, `null` or of
/// the wrong type, and reads as `None` in all three cases. Unknown keys are
/// ignored, so a page of TMDB results deserializes directly into
/// `Vec<MovieRecord>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub genre_ids: Option<Vec<GenreId>>,
    #[serde(default, deserialize_with = "lenient")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub vote_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub original_language: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub release_date: Option<String>,
}

/// Deserialize an optional field, mapping a value of the wrong shape to `None`
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl MovieRecord {
    /// Create a record with only an id and a title set
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    pub fn with_genres(mut self, genre_ids: Vec<GenreId>) -> Self {
        self.genre_ids = Some(genre_ids);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.original_language = Some(language.into());
        self
    }

    pub fn with_votes(mut self, vote_average: f64, vote_count: u64) -> Self {
        self.vote_average = Some(vote_average);
        self.vote_count = Some(vote_count);
        self
    }
}

// =============================================================================
// Normalized Output
// =============================================================================

/// A movie with all display fields defaulted and its derived text.
///
/// `combined_text` can only be produced by the normalizer, so it is always
/// in sync with the fields it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedMovie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub genre_ids: Vec<GenreId>,
    /// Kept optional so callers can show "N/A" instead of a fake 0.0
    pub vote_average: Option<f64>,
    pub vote_count: u64,
    pub original_language: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub(crate) combined_text: String,
}

impl NormalizedMovie {
    /// The single text field used as the unit of vectorization
    pub fn combined_text(&self) -> &str {
        &self.combined_text
    }
}

/// Ordered sequence of normalized movies.
///
/// The position of a movie in this table is its identity inside the
/// similarity engine. Titles may repeat.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogTable {
    pub(crate) movies: Vec<NormalizedMovie>,
}

impl CatalogTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self { movies: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Get the movie at a position
    pub fn get(&self, position: Position) -> Option<&NormalizedMovie> {
        self.movies.get(position)
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[NormalizedMovie] {
        &self.movies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedMovie> {
        self.movies.iter()
    }

    /// Titles in catalog order, duplicates included
    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.movies.iter().map(|m| m.title.as_str())
    }

    /// Derived texts in catalog order
    pub fn combined_texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.movies.iter().map(|m| m.combined_text.as_str())
    }
}

impl<'a> IntoIterator for &'a CatalogTable {
    type Item = &'a NormalizedMovie;
    type IntoIter = std::slice::Iter<'a, NormalizedMovie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}
