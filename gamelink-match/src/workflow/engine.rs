//! Resolution engine
//!
//! Drives every non-hidden library entry through every requested source:
//!
//! ```text
//! entry ─▶ provider.query(normalized_title)   (gate + rate limit + retry)
//!       ─▶ validate, normalize, score each candidate
//!       ─▶ disambiguate ─▶ MatchResult
//! ```
//!
//! # Concurrency
//! Pairs run on a `buffer_unordered` stream `concurrency_limit` wide. A
//! semaphore with the same number of permits sits in front of the
//! providers, and an optional per-source rate limiter paces calls to each
//! catalog. Results are re-ordered by (entry index, source) once the stream
//! drains, so output order never depends on completion order.
//!
//! # Error Handling
//! - A requested source with no provider fails the whole call up front
//! - Provider failures become `LOOKUP_FAILED` for that pair only
//! - Malformed candidates are dropped with a warning
//! - Cancellation turns outstanding pairs into `LOOKUP_FAILED`

use super::stats::{RunStats, RunSummary};
use crate::config::MatchConfig;
use crate::error::ResolveError;
use crate::providers::{CandidateProvider, ProviderError};
use crate::services::disambiguator::disambiguate;
use crate::services::normalizer::Normalizer;
use crate::services::similarity::score;
use crate::types::{LibraryEntry, MatchCandidate, MatchResult, ScoredCandidate, Source};
use crate::utils::retry::{RetryError, RetryPolicy};
use futures::stream::{self, StreamExt};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

type SourceRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Everything one `resolve` call produced
#[derive(Debug, Clone, Serialize)]
pub struct ResolveOutcome {
    /// One result per (non-hidden entry, source), entry order then source order
    pub results: Vec<MatchResult>,
    pub summary: RunSummary,
}

/// Cross-catalog resolution engine
pub struct ResolutionEngine {
    config: MatchConfig,
    normalizer: Normalizer,
    retry_policy: RetryPolicy,
    providers: BTreeMap<Source, Arc<dyn CandidateProvider>>,
    limiters: BTreeMap<Source, SourceRateLimiter>,
    gate: Semaphore,
}

impl ResolutionEngine {
    /// Create an engine with no providers
    ///
    /// # Errors
    /// Returns `ResolveError::InvalidConfig` if `config` fails validation.
    pub fn new(config: MatchConfig) -> Result<Self, ResolveError> {
        config.validate()?;

        Ok(Self {
            normalizer: config.normalizer(),
            retry_policy: config.retry_policy(),
            gate: Semaphore::new(config.concurrency_limit),
            providers: BTreeMap::new(),
            limiters: BTreeMap::new(),
            config,
        })
    }

    /// Register `provider` for its source, replacing any earlier one
    pub fn register_provider(&mut self, provider: Arc<dyn CandidateProvider>) {
        let source = provider.source();

        if let Some(rps) = self.config.requests_per_second.and_then(NonZeroU32::new) {
            self.limiters
                .insert(source, RateLimiter::direct(Quota::per_second(rps)));
        }

        if self.providers.insert(source, provider).is_some() {
            info!(source = %source, "Replaced candidate provider");
        } else {
            debug!(source = %source, "Registered candidate provider");
        }
    }

    /// Builder form of [`register_provider`](Self::register_provider)
    pub fn with_provider(mut self, provider: Arc<dyn CandidateProvider>) -> Self {
        self.register_provider(provider);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Normalizer applied to library and candidate titles
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Sources with a registered provider
    pub fn sources(&self) -> Vec<Source> {
        self.providers.keys().copied().collect()
    }

    /// Resolve `entries` against `sources`
    ///
    /// Sources are de-duplicated and processed in their natural order.
    ///
    /// # Errors
    /// Returns `ResolveError::MissingProvider` before any lookup if a
    /// requested source has no provider. Lookup failures never error; they
    /// come back as `LOOKUP_FAILED` results.
    pub async fn resolve(
        &self,
        entries: &[LibraryEntry],
        sources: &[Source],
        cancel: &CancellationToken,
    ) -> Result<ResolveOutcome, ResolveError> {
        let sources: BTreeSet<Source> = sources.iter().copied().collect();
        if let Some(missing) = sources.iter().find(|s| !self.providers.contains_key(*s)) {
            return Err(ResolveError::MissingProvider(*missing));
        }

        let stats = RunStats::new();
        let hidden = entries.iter().filter(|e| e.is_hidden).count();
        stats.record_hidden(hidden);

        let pairs: Vec<(usize, &LibraryEntry, Source)> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_hidden)
            .flat_map(|(index, entry)| sources.iter().map(move |source| (index, entry, *source)))
            .collect();
        let total_pairs = pairs.len();

        info!(
            entries = entries.len(),
            hidden,
            sources = ?sources,
            pairs = total_pairs,
            concurrency = self.config.concurrency_limit,
            "Starting resolution pass"
        );

        let run_cancel = cancel.child_token();
        let timer = self.config.run_timeout().map(|timeout| {
            let token = run_cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                warn!(
                    timeout_secs = timeout.as_secs(),
                    "Run timeout reached, cancelling outstanding lookups"
                );
                token.cancel();
            })
        });

        let stats_ref = &stats;
        let cancel_ref = &run_cancel;

        let mut indexed: Vec<(usize, Source, MatchResult)> = stream::iter(pairs)
            .map(|(index, entry, source)| async move {
                let result = self.resolve_pair(entry, source, stats_ref, cancel_ref).await;

                let done = stats_ref.record_pair();
                if done % 50 == 0 || done == total_pairs {
                    info!(progress = format!("{}/{}", done, total_pairs), "Resolution progress");
                }

                (index, source, result)
            })
            .buffer_unordered(self.config.concurrency_limit)
            .collect()
            .await;

        if let Some(timer) = timer {
            timer.abort();
        }

        indexed.sort_by_key(|(index, source, _)| (*index, *source));
        let results: Vec<MatchResult> = indexed.into_iter().map(|(_, _, result)| result).collect();
        let summary = stats.summary();

        info!(
            results = results.len(),
            provider_calls = summary.provider_calls,
            retries = summary.retries,
            failed = summary.failed_lookups,
            cancelled = summary.cancelled_lookups,
            dropped_candidates = summary.dropped_candidates,
            "Resolution pass complete"
        );

        Ok(ResolveOutcome { results, summary })
    }

    /// Resolve one `(entry, source)` pair; never fails
    async fn resolve_pair(
        &self,
        entry: &LibraryEntry,
        source: Source,
        stats: &RunStats,
        cancel: &CancellationToken,
    ) -> MatchResult {
        // Re-derived so library and candidate titles share one normalizer
        let normalized_title = self.normalizer.normalize(&entry.title);
        if normalized_title.is_empty() {
            warn!(
                entry = %entry.id,
                title = %entry.title,
                source = %source,
                "Title normalizes to nothing, skipping lookup"
            );
            return MatchResult::unmatched(entry, source, None, Vec::new());
        }

        let Some(provider) = self.providers.get(&source) else {
            stats.record_failed();
            return MatchResult::lookup_failed(entry, source, "no provider registered");
        };
        let provider: &dyn CandidateProvider = provider.as_ref();
        let limiter = self.limiters.get(&source);
        let gate = &self.gate;
        let query = normalized_title.as_str();

        let operation = format!("{} query '{}'", source, query);
        let attempt = AtomicU32::new(0);

        let outcome = self
            .retry_policy
            .run(&operation, cancel, move || {
                let is_retry = attempt.fetch_add(1, Ordering::Relaxed) > 0;
                async move {
                    let _permit = gate.acquire().await.map_err(|_| {
                        ProviderError::Permanent("provider gate closed".to_string())
                    })?;
                    if let Some(limiter) = limiter {
                        limiter.until_ready().await;
                    }
                    // Counted only once the attempt actually reaches the provider
                    if is_retry {
                        stats.record_retry();
                    }
                    stats.record_provider_call();
                    provider.query(query).await
                }
            })
            .await;

        let result = match outcome {
            Ok(candidates) => self.select(entry, source, candidates, stats),
            Err(RetryError::Cancelled) => {
                stats.record_cancelled();
                stats.record_failed();
                debug!(entry = %entry.id, source = %source, "Lookup cancelled");
                MatchResult::lookup_failed(entry, source, "lookup cancelled")
            }
            Err(RetryError::Exhausted { attempts, last }) => {
                stats.record_failed();
                warn!(
                    entry = %entry.id,
                    source = %source,
                    attempts,
                    error = %last,
                    "Lookup failed after retries"
                );
                MatchResult::lookup_failed(
                    entry,
                    source,
                    format!("{} (gave up after {} attempts)", last, attempts),
                )
            }
            Err(RetryError::Permanent(err)) => {
                stats.record_failed();
                warn!(entry = %entry.id, source = %source, error = %err, "Lookup failed");
                MatchResult::lookup_failed(entry, source, err.to_string())
            }
        };

        debug!(
            entry = %entry.id,
            source = %source,
            tier = %result.confidence_tier,
            selected = ?result.selected_id(),
            top_score = ?result.top_score,
            "Pair resolved"
        );

        result
    }

    fn select(
        &self,
        entry: &LibraryEntry,
        source: Source,
        candidates: Vec<MatchCandidate>,
        stats: &RunStats,
    ) -> MatchResult {
        let (scored, dropped) = self.score_candidates(entry, source, candidates);
        stats.record_dropped(dropped);
        disambiguate(entry, source, scored, &self.config).with_dropped_candidates(dropped)
    }

    /// Validate and score raw candidates against `entry`
    ///
    /// Both sides are normalized with the engine's normalizer; the entry's
    /// precomputed `normalized_title` is not consulted.
    ///
    /// Returns the scored candidates and the number of malformed ones
    /// dropped.
    pub fn score_candidates(
        &self,
        entry: &LibraryEntry,
        source: Source,
        candidates: Vec<MatchCandidate>,
    ) -> (Vec<ScoredCandidate>, usize) {
        let mut dropped = 0;
        let entry_title = self.normalizer.normalize(&entry.title);

        let scored = candidates
            .into_iter()
            .filter_map(|candidate| match candidate.validate(source) {
                Ok(()) => {
                    let candidate_title = self.normalizer.normalize(&candidate.candidate_title);
                    let similarity = score(&entry_title, &candidate_title);
                    Some(ScoredCandidate::new(candidate, similarity, entry.release_year))
                }
                Err(reason) => {
                    dropped += 1;
                    warn!(
                        entry = %entry.id,
                        source = %source,
                        reason = %reason,
                        "Dropping malformed candidate"
                    );
                    None
                }
            })
            .collect();

        (scored, dropped)
    }
}
