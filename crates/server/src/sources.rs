//! Where catalog records come from.
//!
//! The service never talks to TMDB or the filesystem directly; it asks a
//! [`CatalogSource`] for a fresh batch of records on every build.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use catalog::{MovieRecord, loader};
use tmdb_client::TmdbClient;

/// A provider of raw movie records
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    /// Fetch the full set of records, in catalog order
    async fn fetch_records(&self) -> Result<Vec<MovieRecord>>;
}

/// Popular movies from the TMDB API
pub struct TmdbCatalogSource {
    client: TmdbClient,
    pages: u32,
}

impl TmdbCatalogSource {
    pub fn new(client: TmdbClient, pages: u32) -> Self {
        Self { client, pages }
    }
}

#[async_trait]
impl CatalogSource for TmdbCatalogSource {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn fetch_records(&self) -> Result<Vec<MovieRecord>> {
        self.client
            .popular_movies(self.pages)
            .await
            .with_context(|| format!("Failed to fetch {} pages of popular movies", self.pages))
    }
}

/// Records read from an offline JSON snapshot
pub struct SnapshotCatalogSource {
    path: PathBuf,
}

impl SnapshotCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for SnapshotCatalogSource {
    fn name(&self) -> &str {
        "snapshot"
    }

    async fn fetch_records(&self) -> Result<Vec<MovieRecord>> {
        let path = self.path.clone();
        let records = tokio::task::spawn_blocking(move || loader::load_records(&path))
            .await
            .context("Snapshot loading task panicked")?
            .with_context(|| format!("Failed to load snapshot {}", self.path.display()))?;

        info!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}
