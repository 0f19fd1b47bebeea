//! Catalog normalization.
//!
//! Turns raw [`MovieRecord`]s into a [`CatalogTable`]:
//! - every missing text field becomes an empty string
//! - missing genre ids become an empty list
//! - `combined_text` is derived per movie
//!
//! Input order is preserved exactly. Nothing is sorted or deduplicated.

use crate::types::*;
use tracing::debug;

/// Normalize a sequence of raw records into a catalog table.
///
/// Never fails. An empty input yields an empty table; rejecting that is the
/// engine's job.
pub fn normalize<I>(records: I) -> CatalogTable
where
    I: IntoIterator<Item = MovieRecord>,
{
    let movies: Vec<NormalizedMovie> = records.into_iter().map(normalize_record).collect();
    debug!("Normalized {} movie records", movies.len());
    CatalogTable { movies }
}

/// Normalize a single record
pub fn normalize_record(record: MovieRecord) -> NormalizedMovie {
    let title = record.title.unwrap_or_default();
    let overview = record.overview.unwrap_or_default();
    let genre_ids = record.genre_ids.unwrap_or_default();
    let original_language = record.original_language.unwrap_or_default();

    let combined_text = combine_text(&title, &overview, &genre_ids, &original_language);

    NormalizedMovie {
        id: record.id,
        title,
        overview,
        genre_ids,
        vote_average: record.vote_average,
        vote_count: record.vote_count.unwrap_or(0),
        original_language,
        poster_path: record.poster_path,
        release_date: record.release_date,
        combined_text,
    }
}

/// Build the derived text of a movie.
///
/// Order is fixed: title, overview, genre ids, language, joined by single
/// spaces. Empty parts still contribute their separator.
pub fn combine_text(
    title: &str,
    overview: &str,
    genre_ids: &[GenreId],
    original_language: &str,
) -> String {
    let genres = genre_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} {} {} {}", title, overview, genres, original_language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_text_order() {
        let text = combine_text("Alien", "crew meets creature", &[27, 878], "en");
        assert_eq!(text, "Alien crew meets creature 27 878 en");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record = MovieRecord {
            id: 7,
            title: Some("Solo".to_string()),
            original_language: Some("en".to_string()),
            ..MovieRecord::default()
        };

        let movie = normalize_record(record);

        assert_eq!(movie.overview, "");
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.vote_count, 0);
        assert_eq!(movie.vote_average, None);
        assert_eq!(movie.combined_text(), "Solo   en");
    }

    #[test]
    fn test_record_with_only_id() {
        let movie = normalize_record(MovieRecord {
            id: 1,
            ..MovieRecord::default()
        });

        assert_eq!(movie.title, "");
        assert_eq!(movie.combined_text(), "   ");
    }

    #[test]
    fn test_normalize_preserves_order_and_duplicates() {
        let records = vec![
            MovieRecord::new(3, "Heat"),
            MovieRecord::new(1, "Alien"),
            MovieRecord::new(2, "Heat"),
        ];

        let table = normalize(records);

        let titles: Vec<&str> = table.titles().collect();
        assert_eq!(titles, vec!["Heat", "Alien", "Heat"]);
        assert_eq!(table.get(2).map(|m| m.id), Some(2));
    }

    #[test]
    fn test_normalize_empty_input() {
        let table = normalize(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
