//! Per-run counters
//!
//! Created by the engine for one `resolve` call and shared by reference
//! with every worker; frozen into a [`RunSummary`] when the pass ends.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Live counters for one resolution pass
#[derive(Debug, Default)]
pub struct RunStats {
    pairs_resolved: AtomicUsize,
    provider_calls: AtomicUsize,
    retries: AtomicUsize,
    dropped_candidates: AtomicUsize,
    cancelled_lookups: AtomicUsize,
    failed_lookups: AtomicUsize,
    hidden_skipped: AtomicUsize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a finished pair, returning the running total
    pub fn record_pair(&self) -> usize {
        self.pairs_resolved.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn record_provider_call(&self) {
        self.provider_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self, count: usize) {
        self.dropped_candidates.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_cancelled(&self) {
        self.cancelled_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hidden(&self, count: usize) {
        self.hidden_skipped.fetch_add(count, Ordering::Relaxed);
    }

    /// Snapshot the counters
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            pairs_resolved: self.pairs_resolved.load(Ordering::Relaxed),
            provider_calls: self.provider_calls.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            dropped_candidates: self.dropped_candidates.load(Ordering::Relaxed),
            cancelled_lookups: self.cancelled_lookups.load(Ordering::Relaxed),
            failed_lookups: self.failed_lookups.load(Ordering::Relaxed),
            hidden_skipped: self.hidden_skipped.load(Ordering::Relaxed),
        }
    }
}

/// Immutable totals for a finished pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// `(entry, source)` pairs that produced a result
    pub pairs_resolved: usize,
    /// Provider calls attempted, retries included
    pub provider_calls: usize,
    pub retries: usize,
    /// Malformed candidates discarded before scoring
    pub dropped_candidates: usize,
    /// Lookups abandoned because the run was cancelled
    pub cancelled_lookups: usize,
    /// Lookups that ended `LOOKUP_FAILED`, cancellations included
    pub failed_lookups: usize,
    /// Hidden library entries skipped (counted once per entry)
    pub hidden_skipped: usize,
}
