//! Candidate providers
//!
//! A provider wraps one external catalog. Given a normalized title it
//! returns whatever records the catalog offers; the engine does all
//! scoring and selection. Live network clients plug in here by
//! implementing [`CandidateProvider`].

pub mod fixture;

pub use fixture::FixtureProvider;

use crate::types::{MatchCandidate, Source};
use crate::utils::retry::Retryable;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Provider failure, classified for the retry policy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Network hiccup, timeout, 5xx: worth another attempt
    #[error("Transient provider error: {0}")]
    Transient(String),

    /// Upstream quota hit
    #[error("Rate limit exceeded")]
    RateLimited { retry_after: Option<Duration> },

    /// Bad request, auth failure, unparseable response: retrying won't help
    #[error("Permanent provider error: {0}")]
    Permanent(String),
}

impl Retryable for ProviderError {
    fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Transient(_) | ProviderError::RateLimited { .. })
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            ProviderError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// One external catalog, queried by normalized title
///
/// # Example
/// ```rust,ignore
/// struct HltbClient { /* http client */ }
///
/// #[async_trait::async_trait]
/// impl CandidateProvider for HltbClient {
///     fn source(&self) -> Source { Source::Hltb }
///
///     async fn query(&self, title: &str) -> Result<Vec<MatchCandidate>, ProviderError> {
///         // search endpoint, map records to MatchCandidate
///     }
/// }
/// ```
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    /// Catalog this provider serves
    fn source(&self) -> Source;

    /// Records the catalog offers for `normalized_title`
    ///
    /// An empty list means the catalog has nothing; errors are reserved for
    /// failures to ask.
    async fn query(&self, normalized_title: &str) -> Result<Vec<MatchCandidate>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        assert!(ProviderError::Transient("reset".into()).is_retryable());
        assert!(ProviderError::RateLimited { retry_after: None }.is_retryable());
        assert!(!ProviderError::Permanent("401".into()).is_retryable());
    }

    #[test]
    fn test_retry_after_only_from_rate_limit() {
        let hint = Duration::from_secs(2);
        assert_eq!(ProviderError::RateLimited { retry_after: Some(hint) }.retry_after(), Some(hint));
        assert_eq!(ProviderError::Transient("x".into()).retry_after(), None);
    }
}
