//! # Recommendation Service
//!
//! Owns one built [`SimilarityEngine`] and answers queries against it:
//! 1. Fetch raw records from a [`CatalogSource`]
//! 2. Normalize them into a catalog table
//! 3. Build the engine on a blocking thread
//! 4. Serve title lists and recommendations
//!
//! Nothing is cached process-wide. The caller owns the service and decides
//! when to [`rebuild`](RecommendationService::rebuild). A rebuild creates a
//! brand new engine and swaps it in only once it is complete, so readers
//! holding the previous `Arc` keep a consistent engine.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument, warn};

use catalog::{MovieId, normalize};
use engine::{ScoredMovie, SimilarityEngine};

use crate::sources::CatalogSource;

/// Recommendation returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub vote_average: Option<f64>,
    pub vote_count: u64,
    pub original_language: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub similarity: f64,
}

impl From<ScoredMovie<'_>> for MovieRecommendation {
    fn from(scored: ScoredMovie<'_>) -> Self {
        let movie = scored.movie;
        Self {
            id: movie.id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            original_language: movie.original_language.clone(),
            poster_path: movie.poster_path.clone(),
            release_date: movie.release_date.clone(),
            similarity: scored.score,
        }
    }
}

/// Caller-owned holder of the current engine
pub struct RecommendationService {
    source: Box<dyn CatalogSource>,
    engine: Arc<SimilarityEngine>,
}

impl RecommendationService {
    /// Fetch the catalog from `source` and build the first engine
    pub async fn build(source: impl CatalogSource + 'static) -> Result<Self> {
        let source: Box<dyn CatalogSource> = Box::new(source);
        let engine = build_engine(source.as_ref()).await?;
        Ok(Self {
            source,
            engine: Arc::new(engine),
        })
    }

    /// Refetch the catalog and replace the engine.
    ///
    /// On failure the current engine is kept and the error is returned.
    pub async fn rebuild(&mut self) -> Result<()> {
        match build_engine(self.source.as_ref()).await {
            Ok(engine) => {
                self.engine = Arc::new(engine);
                Ok(())
            }
            Err(e) => {
                warn!("Rebuild failed, keeping previous engine: {:#}", e);
                Err(e)
            }
        }
    }

    /// Shared handle to the current engine
    pub fn engine(&self) -> Arc<SimilarityEngine> {
        Arc::clone(&self.engine)
    }

    pub fn all_titles(&self) -> Vec<String> {
        self.engine
            .all_titles()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Top `top_n` movies similar to `title`.
    ///
    /// A missing title surfaces as a downcastable [`engine::EngineError`].
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str, top_n: usize) -> Result<Vec<MovieRecommendation>> {
        let results = self.engine.recommend(title, top_n)?;
        Ok(results.into_iter().map(MovieRecommendation::from).collect())
    }
}

async fn build_engine(source: &dyn CatalogSource) -> Result<SimilarityEngine> {
    let start = Instant::now();

    let records = source
        .fetch_records()
        .await
        .with_context(|| format!("Failed to fetch catalog from {}", source.name()))?;
    let table = normalize(records);
    info!("Normalized {} movies from {}", table.len(), source.name());

    let engine = tokio::task::spawn_blocking(move || SimilarityEngine::new(table))
        .await
        .context("Engine build task panicked")?
        .context("Failed to build similarity engine")?;

    info!("Engine ready in {:.2?}", start.elapsed());
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog::MovieRecord;
    use engine::EngineError;
    use std::sync::Mutex;

    /// Serves a queue of canned responses, one per fetch
    struct ScriptedSource {
        responses: Mutex<Vec<Result<Vec<MovieRecord>>>>,
    }

    impl ScriptedSource {
        fn new(mut responses: Vec<Result<Vec<MovieRecord>>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_records(&self) -> Result<Vec<MovieRecord>> {
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(anyhow::anyhow!("no more responses")))
        }
    }

    fn first_catalog() -> Vec<MovieRecord> {
        vec![
            MovieRecord::new(1, "A")
                .with_overview("space war robots")
                .with_votes(7.5, 1200)
                .with_language("en"),
            MovieRecord::new(2, "B").with_overview("space opera robots"),
            MovieRecord::new(3, "C").with_overview("cooking show"),
        ]
    }

    fn second_catalog() -> Vec<MovieRecord> {
        vec![
            MovieRecord::new(10, "X").with_overview("haunted house"),
            MovieRecord::new(11, "Y").with_overview("haunted ship"),
        ]
    }

    #[tokio::test]
    async fn test_build_and_recommend() {
        let service = RecommendationService::build(ScriptedSource::new(vec![Ok(first_catalog())]))
            .await
            .unwrap();

        let recs = service.recommend("B", 2).unwrap();

        assert_eq!(service.all_titles(), vec!["A", "B", "C"]);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id, 1);
        assert_eq!(recs[0].vote_average, Some(7.5));
        assert_eq!(recs[0].original_language, "en");
        assert!(recs[0].similarity > recs[1].similarity);
    }

    #[tokio::test]
    async fn test_unknown_title_is_downcastable() {
        let service = RecommendationService::build(ScriptedSource::new(vec![Ok(first_catalog())]))
            .await
            .unwrap();

        let err = service.recommend("Z", 5).unwrap_err();

        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::TitleNotFound {
                title: "Z".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_empty_catalog_fails_build() {
        let result = RecommendationService::build(ScriptedSource::new(vec![Ok(Vec::new())])).await;

        let err = result.err().unwrap();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::EmptyCatalog)
        );
    }

    #[tokio::test]
    async fn test_rebuild_swaps_engine_and_keeps_old_handles() {
        let mut service = RecommendationService::build(ScriptedSource::new(vec![
            Ok(first_catalog()),
            Ok(second_catalog()),
        ]))
        .await
        .unwrap();
        let old = service.engine();

        service.rebuild().await.unwrap();

        assert_eq!(service.all_titles(), vec!["X", "Y"]);
        assert_eq!(old.all_titles(), vec!["A", "B", "C"]);
        assert!(service.recommend("A", 1).is_err());
        assert_eq!(service.recommend("X", 1).unwrap()[0].title, "Y");
    }

    #[tokio::test]
    async fn test_failed_rebuild_keeps_previous_engine() {
        let mut service = RecommendationService::build(ScriptedSource::new(vec![
            Ok(first_catalog()),
            Err(anyhow::anyhow!("TMDB unavailable")),
            Ok(Vec::new()),
        ]))
        .await
        .unwrap();

        assert!(service.rebuild().await.is_err());
        assert_eq!(service.all_titles(), vec!["A", "B", "C"]);

        // Empty catalog is also a failed rebuild
        assert!(service.rebuild().await.is_err());
        assert_eq!(service.recommend("A", 1).unwrap()[0].title, "B");
    }
}
