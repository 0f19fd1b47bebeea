use thiserror::Error;

/// Errors that can occur when talking to TMDB
#[derive(Error, Debug)]
pub enum TmdbError {
    /// Transport failure or undecodable body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// TMDB answered with a non-success status
    #[error("TMDB returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Missing or invalid configuration
    #[error("Invalid TMDB configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TmdbError>;
