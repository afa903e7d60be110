//! Test helper utilities
//!
//! Shared fixtures for gamelink-match integration tests

#![allow(dead_code)]

pub mod scripted_provider;

pub use scripted_provider::ScriptedProvider;

use gamelink_match::{LibraryEntry, MatchConfig, Normalizer};

/// Library entry with the default normalizer
pub fn entry(id: &str, title: &str, year: Option<i32>) -> LibraryEntry {
    LibraryEntry::new(id, title, &Normalizer::default())
        .expect("valid test entry")
        .with_release_year(year)
}

/// Config with millisecond backoffs so retry tests stay fast
pub fn fast_config() -> MatchConfig {
    MatchConfig {
        initial_backoff_ms: 1,
        max_backoff_ms: 5,
        backoff_jitter: 0.0,
        ..MatchConfig::default()
    }
}
