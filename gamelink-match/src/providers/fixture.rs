//! File-backed candidate provider
//!
//! Serves pre-extracted catalog records for offline runs. The fixture is a
//! JSON object mapping a query title to the records the catalog returned
//! for it:
//!
//! ```json
//! {
//!   "Dead Space": [
//!     { "id": "1", "title": "Dead Space", "year": 2008 },
//!     { "id": "2", "title": "Dead Space", "year": 2023,
//!       "attributes": { "kind": "IGDB", "category": 8 } }
//!   ]
//! }
//! ```
//!
//! Keys are normalized on load, so they can be written as the library
//! spells them.

use super::{CandidateProvider, ProviderError};
use crate::error::FixtureError;
use crate::services::normalizer::Normalizer;
use crate::types::{MatchCandidate, RawAttributes, Source};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One record as written in a fixture file
#[derive(Debug, Deserialize)]
struct FixtureRecord {
    id: String,
    title: String,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    attributes: RawAttributes,
}

/// Provider answering from an in-memory query → candidates map
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    source: Source,
    candidates: HashMap<String, Vec<MatchCandidate>>,
}

impl FixtureProvider {
    /// Empty provider for `source`
    pub fn new(source: Source) -> Self {
        Self {
            source,
            candidates: HashMap::new(),
        }
    }

    /// Add candidates returned for `query` (normalized on insert)
    pub fn with_candidates(
        mut self,
        normalizer: &Normalizer,
        query: &str,
        candidates: Vec<MatchCandidate>,
    ) -> Self {
        self.candidates
            .entry(normalizer.normalize(query))
            .or_default()
            .extend(candidates);
        self
    }

    /// Parse a fixture document
    pub fn from_json_str(
        source: Source,
        json: &str,
        normalizer: &Normalizer,
    ) -> Result<Self, FixtureError> {
        let records: HashMap<String, Vec<FixtureRecord>> = serde_json::from_str(json)?;

        let mut provider = Self::new(source);
        for (query, entries) in records {
            let candidates = entries
                .into_iter()
                .map(|r| {
                    MatchCandidate::new(source, r.id, r.title)
                        .with_release_year(r.year)
                        .with_attributes(r.attributes)
                })
                .collect();
            provider = provider.with_candidates(normalizer, &query, candidates);
        }

        tracing::debug!(
            source = %source,
            queries = provider.candidates.len(),
            "Loaded fixture candidates"
        );

        Ok(provider)
    }

    /// Load a fixture file from disk
    pub fn from_path(
        source: Source,
        path: &Path,
        normalizer: &Normalizer,
    ) -> Result<Self, FixtureError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(source, &json, normalizer)
    }

    /// Number of distinct queries with stored candidates
    pub fn query_count(&self) -> usize {
        self.candidates.len()
    }
}

#[async_trait]
impl CandidateProvider for FixtureProvider {
    fn source(&self) -> Source {
        self.source
    }

    async fn query(&self, normalized_title: &str) -> Result<Vec<MatchCandidate>, ProviderError> {
        Ok(self
            .candidates
            .get(normalized_title)
            .cloned()
            .unwrap_or_default())
    }
}
