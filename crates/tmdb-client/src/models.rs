//! Response bodies returned by the TMDB REST API.
//!
//! List endpoints return [`catalog::MovieRecord`] directly; only the
//! details endpoint has its own shape.

use catalog::{GenreId, MovieId, MovieRecord};
use serde::{Deserialize, Serialize};

/// One page of `/movie/popular` or `/search/movie`
#[derive(Debug, Deserialize)]
pub(crate) struct PageResponse {
    #[serde(default)]
    pub results: Vec<MovieRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: u64,
    pub name: String,
}

/// The `keywords` block appended to a details response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordList {
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

/// `/movie/{id}?append_to_response=keywords`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub keywords: KeywordList,
}

impl MovieDetails {
    pub fn keyword_names(&self) -> Vec<&str> {
        self.keywords
            .keywords
            .iter()
            .map(|k| k.name.as_str())
            .collect()
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_with_keywords() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "overview": "A hacker learns the truth",
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
            "runtime": 136,
            "budget": 63000000,
            "keywords": {"keywords": [{"id": 83, "name": "saving the world"}, {"id": 310, "name": "artificial intelligence"}]}
        }"#;

        let details: MovieDetails = serde_json::from_str(json).unwrap();

        assert_eq!(details.runtime, Some(136));
        assert_eq!(details.genre_names(), vec!["Action", "Science Fiction"]);
        assert_eq!(
            details.keyword_names(),
            vec!["saving the world", "artificial intelligence"]
        );
    }

    #[test]
    fn test_details_without_optional_blocks() {
        let details: MovieDetails = serde_json::from_str(r#"{"id": 1, "runtime": null}"#).unwrap();

        assert!(details.genres.is_empty());
        assert!(details.keyword_names().is_empty());
        assert_eq!(details.runtime, None);
    }

    #[test]
    fn test_page_results_default_to_empty() {
        let page: PageResponse = serde_json::from_str(r#"{"page": 7}"#).unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_page_keeps_movies_with_mistyped_fields() {
        let json = r#"{"page": 1, "results": [
            {"id": 680, "title": "Pulp Fiction", "genre_ids": "80 53", "vote_average": 8.5},
            {"id": 807, "title": "Se7en", "genre_ids": [80, 9648], "vote_count": "many"}
        ]}"#;

        let page: PageResponse = serde_json::from_str(json).unwrap();

        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].genre_ids, None);
        assert_eq!(page.results[0].vote_average, Some(8.5));
        assert_eq!(page.results[1].genre_ids, Some(vec![80, 9648]));
        assert_eq!(page.results[1].vote_count, None);
    }
}
