//! Client for The Movie Database (TMDB) REST API.
//!
//! This crate provides the remote catalog used to build a similarity
//! engine. It handles:
//! - Configuration from `TMDB_*` environment variables
//! - Fetching pages of popular movies
//! - Title search and per-movie details with keywords
//! - Building poster image URLs
//!
//! Every request carries the API key as the `api_key` query parameter.
//! Failures are reported once; there is no retry.

pub mod config;
pub mod error;
pub mod models;

pub use config::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL, TmdbConfig};
pub use error::{Result, TmdbError};
pub use models::{Genre, Keyword, KeywordList, MovieDetails};

use catalog::{MovieId, MovieRecord};
use models::PageResponse;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Default number of search results kept
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Join an image base URL and a poster path
pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!("{}{}", image_base_url, poster_path)
}

/// Client for the TMDB REST API.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            config,
        }
    }

    /// Build a client from `TMDB_*` environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(TmdbConfig::from_env()?))
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    /// Fetch `pages` pages of popular movies, concatenated in page order.
    ///
    /// TMDB serves 20 movies per page, so 5 pages is about 100 movies.
    #[instrument(skip(self))]
    pub async fn popular_movies(&self, pages: u32) -> Result<Vec<MovieRecord>> {
        let start = Instant::now();
        let mut movies = Vec::new();

        for page in 1..=pages {
            let response: PageResponse = self
                .get("/movie/popular", &[("page", page.to_string())])
                .await?;
            debug!("Page {} returned {} movies", page, response.results.len());
            movies.extend(response.results);
        }

        info!(
            "Fetched {} popular movies over {} pages in {:.2?}",
            movies.len(),
            pages,
            start.elapsed()
        );
        Ok(movies)
    }

    /// Search movies by title, keeping at most `limit` results.
    ///
    /// An empty query returns no results without contacting TMDB.
    #[instrument(skip(self))]
    pub async fn search_movies(&self, query: &str, limit: usize) -> Result<Vec<MovieRecord>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response: PageResponse = self
            .get("/search/movie", &[("query", query.to_string())])
            .await?;

        let mut results = response.results;
        results.truncate(limit);
        debug!("Search '{}' returned {} movies", query, results.len());
        Ok(results)
    }

    /// Full details for one movie, keywords included
    #[instrument(skip(self))]
    pub async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
        self.get(
            &format!("/movie/{}", movie_id),
            &[("append_to_response", "keywords".to_string())],
        )
        .await
    }

    /// Full poster URL for a poster path
    pub fn poster_url(&self, poster_path: &str) -> String {
        poster_url(&self.config.image_base_url, poster_path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("TMDB request to {} failed with status {}", path, status);
            return Err(TmdbError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}
