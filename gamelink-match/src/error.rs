//! Error types for gamelink-match
//!
//! Errors split by who has to deal with them: input errors reject a single
//! library row, provider errors are absorbed into `LOOKUP_FAILED` results,
//! and resolve errors are configuration mistakes that stop a run before it
//! starts.

use crate::types::Source;
use thiserror::Error;

/// A library record that cannot become a `LibraryEntry`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Entry has no identifier
    #[error("Library entry '{title}' has no id")]
    MissingId { title: String },

    /// Entry has no title
    #[error("Library entry {id} has no title")]
    MissingTitle { id: String },

    /// A field could not be parsed
    #[error("Library entry {id}: invalid {field} '{value}'")]
    InvalidField {
        id: String,
        field: &'static str,
        value: String,
    },
}

/// Errors raised before any lookup is attempted
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A source was requested that has no registered provider
    #[error("No candidate provider registered for {0}")]
    MissingProvider(Source),

    /// Matching configuration failed validation
    #[error("Invalid matching configuration: {0}")]
    InvalidConfig(String),
}

/// Errors loading the library export
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required column absent from the header row
    #[error("Missing column '{0}' in library export")]
    MissingColumn(String),
}

/// Errors loading fixture candidates
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fixture parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
