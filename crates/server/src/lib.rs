//! Server crate for the movie similarity engine.
//!
//! This crate wires a catalog source to the engine and owns the built
//! engine on behalf of its caller.

pub mod service;
pub mod sources;

pub use service::{MovieRecommendation, RecommendationService};
pub use sources::{CatalogSource, SnapshotCatalogSource, TmdbCatalogSource};
