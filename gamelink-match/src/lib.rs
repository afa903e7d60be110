//! gamelink-match: cross-catalog game record linkage
//!
//! Links games in a personal library to their records in external catalogs
//! (HLTB, IGDB). Titles are normalized, candidates scored, release years
//! used to disambiguate, and every `(entry, source)` pair is classified into
//! a confidence tier that downstream consumers can trust or send for review.
//!
//! # Example
//! ```rust,ignore
//! let engine = ResolutionEngine::new(MatchConfig::default())?
//!     .with_provider(Arc::new(hltb_provider));
//! let outcome = engine.resolve(&entries, &[Source::Hltb], &cancel).await?;
//! let reports = build_reports(&[Source::Hltb], &outcome.results, engine.config());
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod providers;
pub mod services;
pub mod types;
pub mod utils;
pub mod workflow;

pub use config::{AppConfig, MatchConfig};
pub use error::{FixtureError, InputError, LibraryError, ResolveError};
pub use providers::{CandidateProvider, FixtureProvider, ProviderError};
pub use services::{build_report, build_reports, MatchReport, Normalizer};
pub use types::{ConfidenceTier, LibraryEntry, MatchCandidate, MatchResult, ScoredCandidate, Source};
pub use workflow::{ResolutionEngine, ResolveOutcome, RunSummary};
