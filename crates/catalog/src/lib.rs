//! # Catalog Crate
//!
//! This crate turns raw movie metadata into the uniform table the
//! similarity engine works on.
//!
//! ## Main Components
//!
//! - **types**: MovieRecord (raw input), NormalizedMovie, CatalogTable
//! - **normalize**: Fill defaults and derive `combined_text`
//! - **loader**: Read records from an offline JSON snapshot
//! - **error**: Error types for snapshot loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{loader, normalize};
//! use std::path::Path;
//!
//! let records = loader::load_records(Path::new("data/popular.json"))?;
//! let table = normalize(records);
//!
//! for movie in &table {
//!     println!("{} -> {}", movie.title, movie.combined_text());
//! }
//! ```

// Public modules
pub mod error;
pub mod loader;
pub mod normalize;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use normalize::{combine_text, normalize, normalize_record};
pub use types::{CatalogTable, GenreId, MovieId, MovieRecord, NormalizedMovie, Position};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = CatalogTable::new();
        assert!(table.is_empty());
        assert!(table.get(0).is_none());
        assert_eq!(table.titles().count(), 0);
    }

    #[test]
    fn test_snapshot_to_table() {
        let json = r#"[
            {"id": 1, "title": "Alien", "overview": "crew meets creature", "genre_ids": [27], "original_language": "en"},
            {"id": 2, "title": "Amelie"}
        ]"#;

        let table = normalize(loader::parse_records(json).unwrap());

        assert_eq!(table.len(), 2);
        assert_eq!(table.movies()[0].combined_text(), "Alien crew meets creature 27 en");
        assert_eq!(table.movies()[1].combined_text(), "Amelie   ");
        let texts: Vec<&str> = table.combined_texts().collect();
        assert_eq!(texts.len(), 2);
    }
}
