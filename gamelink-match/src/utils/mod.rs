//! Utility modules for gamelink-match

pub mod retry;

pub use retry::{RetryError, RetryPolicy, Retryable};
