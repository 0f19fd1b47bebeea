//! Loader for offline catalog snapshots.
//!
//! A snapshot is JSON in one of three layouts:
//! - a bare array of movie records
//! - one catalog page: `{"page": 1, "results": [...]}`
//! - an array of catalog pages, concatenated in order

use crate::error::{CatalogError, Result};
use crate::types::MovieRecord;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
struct Page {
    results: Vec<MovieRecord>,
}

/// Parse snapshot JSON into records, preserving order
pub fn parse_records(json: &str) -> Result<Vec<MovieRecord>> {
    parse_named(json, "snapshot")
}

/// Read a snapshot file from disk
pub fn load_records(path: &Path) -> Result<Vec<MovieRecord>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let records = parse_named(&content, &path.display().to_string())?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn parse_named(json: &str, source_name: &str) -> Result<Vec<MovieRecord>> {
    let value: Value = serde_json::from_str(json).map_err(|e| parse_error(source_name, e))?;

    // Dispatch on the outer shape
    let records = match value {
        Value::Array(items) if items.first().is_some_and(|first| first.get("results").is_some()) =>
        {
            let pages: Vec<Page> = from_value(Value::Array(items), source_name)?;
            pages.into_iter().flat_map(|p| p.results).collect()
        }
        Value::Array(items) => from_value(Value::Array(items), source_name)?,
        Value::Object(map) => from_value::<Page>(Value::Object(map), source_name)?.results,
        other => {
            return Err(CatalogError::ParseError {
                source_name: source_name.to_string(),
                reason: format!("expected an array or an object, found {}", other),
            });
        }
    };
    Ok(records)
}

fn from_value<T: DeserializeOwned>(value: Value, source_name: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| parse_error(source_name, e))
}

fn parse_error(source_name: &str, e: serde_json::Error) -> CatalogError {
    CatalogError::ParseError {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    }
}
