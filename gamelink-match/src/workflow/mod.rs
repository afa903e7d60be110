//! Resolution workflow
//!
//! The engine that runs a library through the candidate providers, plus
//! the per-run counters it keeps.

pub mod engine;
pub mod stats;

pub use engine::{ResolutionEngine, ResolveOutcome};
pub use stats::{RunStats, RunSummary};
