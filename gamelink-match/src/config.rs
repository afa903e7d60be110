//! Matching configuration for gamelink-match
//!
//! Loaded from the `[matching]` table of the gamelink TOML config; every
//! field has a default so a partial table (or no file at all) works.

use crate::error::ResolveError;
use crate::services::normalizer::Normalizer;
use crate::types::ConfidenceTier;
use crate::utils::retry::RetryPolicy;
use gamelink_common::config::{load_toml_config, ConfigSource, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Whole config file as seen by the gamelink-match binary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub matching: MatchConfig,
}

impl AppConfig {
    /// Load from `source` and validate the matching section
    pub fn load(source: &ConfigSource) -> gamelink_common::Result<Self> {
        let config: AppConfig = load_toml_config(source)?;
        config
            .matching
            .validate()
            .map_err(|e| gamelink_common::Error::Config(e.to_string()))?;
        Ok(config)
    }
}

/// Tunables for scoring, disambiguation and provider access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Candidates scoring below this are discarded (default 0.80)
    pub min_score_threshold: f64,
    /// Selected candidates at or above this are `HIGH` (default 0.92)
    pub high_score_threshold: f64,
    /// Allowed absolute release-year difference (default 0)
    pub year_tolerance: u32,
    /// Retries after the first attempt on transient provider errors
    pub max_retries: u32,
    /// Maximum provider calls in flight at once
    pub concurrency_limit: usize,
    /// Tiers listed for review in addition to AMBIGUOUS, UNMATCHED and
    /// LOOKUP_FAILED, which are always listed
    pub review_tiers: BTreeSet<ConfidenceTier>,
    /// Cap on alternates kept per result
    pub max_alternates: usize,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    /// Random spread applied to each backoff delay, as a fraction
    pub backoff_jitter: f64,
    /// Per-source request quota; unlimited when absent
    pub requests_per_second: Option<u32>,
    /// Cancel outstanding lookups after this many seconds
    pub run_timeout_secs: Option<u64>,
    /// Trailing qualifiers stripped by the normalizer; built-in list when absent
    pub edition_suffixes: Option<Vec<String>>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_score_threshold: 0.80,
            high_score_threshold: 0.92,
            year_tolerance: 0,
            max_retries: 3,
            concurrency_limit: 4,
            review_tiers: BTreeSet::from([ConfidenceTier::Low]),
            max_alternates: 3,
            initial_backoff_ms: 250,
            max_backoff_ms: 8_000,
            backoff_jitter: 0.2,
            requests_per_second: None,
            run_timeout_secs: None,
            edition_suffixes: None,
        }
    }
}

impl MatchConfig {
    /// Check ranges and cross-field constraints
    ///
    /// # Errors
    /// Returns `ResolveError::InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> Result<(), ResolveError> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);

        if !in_unit(self.min_score_threshold) {
            return Err(ResolveError::InvalidConfig(format!(
                "min_score_threshold must be within [0, 1], got {}",
                self.min_score_threshold
            )));
        }
        if !in_unit(self.high_score_threshold) {
            return Err(ResolveError::InvalidConfig(format!(
                "high_score_threshold must be within [0, 1], got {}",
                self.high_score_threshold
            )));
        }
        if self.min_score_threshold > self.high_score_threshold {
            return Err(ResolveError::InvalidConfig(format!(
                "min_score_threshold ({}) exceeds high_score_threshold ({})",
                self.min_score_threshold, self.high_score_threshold
            )));
        }
        if self.concurrency_limit == 0 {
            return Err(ResolveError::InvalidConfig(
                "concurrency_limit must be at least 1".to_string(),
            ));
        }
        if self.max_alternates < 2 {
            return Err(ResolveError::InvalidConfig(
                "max_alternates must be at least 2".to_string(),
            ));
        }
        if !in_unit(self.backoff_jitter) {
            return Err(ResolveError::InvalidConfig(format!(
                "backoff_jitter must be within [0, 1], got {}",
                self.backoff_jitter
            )));
        }
        if self.initial_backoff_ms > self.max_backoff_ms {
            return Err(ResolveError::InvalidConfig(format!(
                "initial_backoff_ms ({}) exceeds max_backoff_ms ({})",
                self.initial_backoff_ms, self.max_backoff_ms
            )));
        }
        if self.requests_per_second == Some(0) {
            return Err(ResolveError::InvalidConfig(
                "requests_per_second must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Retry schedule for provider calls
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            multiplier: 2.0,
            jitter: self.backoff_jitter,
        }
    }

    /// Normalizer using the configured suffix list
    pub fn normalizer(&self) -> Normalizer {
        match &self.edition_suffixes {
            Some(suffixes) => Normalizer::with_suffixes(suffixes.as_slice()),
            None => Normalizer::default(),
        }
    }

    /// Whether `tier` belongs on the review list
    pub fn needs_review(&self, tier: ConfidenceTier) -> bool {
        matches!(
            tier,
            ConfidenceTier::Ambiguous | ConfidenceTier::Unmatched | ConfidenceTier::LookupFailed
        ) || self.review_tiers.contains(&tier)
    }

    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout_secs.map(Duration::from_secs)
    }
}
