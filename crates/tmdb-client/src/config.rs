use crate::error::{Result, TmdbError};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w342";

/// TMDB configuration loaded from `TMDB_*` environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TmdbConfig {
    /// TMDB API key (`TMDB_API_KEY`)
    pub api_key: String,

    /// REST API base URL (`TMDB_BASE_URL`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Poster image base URL (`TMDB_IMAGE_BASE_URL`)
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

impl TmdbConfig {
    /// Config pointing at the public TMDB endpoints
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load configuration from the environment, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed("TMDB_")
            .from_iter(vars)
            .map_err(|e| TmdbError::Config(e.to_string()))?;

        if config.api_key.trim().is_empty() {
            return Err(TmdbError::Config("TMDB_API_KEY is empty".to_string()));
        }
        Ok(config)
    }
}
