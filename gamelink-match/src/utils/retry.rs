//! Provider call retry logic
//!
//! Implements capped exponential backoff with jitter for transient catalog
//! errors. The same policy wraps every call to a candidate provider.
//!
//! **Algorithm:**
//! 1. Attempt operation
//! 2. If successful, return result
//! 3. If the error is retryable:
//!    a. If retries remain: log WARN, back off, retry
//!    b. Otherwise: log ERROR, return `Exhausted`
//! 4. If the error is not retryable: return `Permanent` immediately
//!
//! Cancellation is checked while the operation runs and while sleeping.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that know whether another attempt can help
pub trait Retryable {
    fn is_retryable(&self) -> bool;

    /// Server-provided minimum wait before the next attempt
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Why a retried operation gave up
#[derive(Debug, Error)]
pub enum RetryError<E: std::fmt::Display> {
    /// Every allowed attempt failed with a retryable error
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },

    /// A non-retryable error ended the operation
    #[error("{0}")]
    Permanent(E),

    /// The cancellation token fired
    #[error("cancelled")]
    Cancelled,
}

/// Bounded retry schedule
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (total attempts = max_retries + 1)
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Growth factor between consecutive delays
    pub multiplier: f64,
    /// Random spread as a fraction of the delay (0.2 = ±20%)
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(8),
            multiplier: 2.0,
            jitter: 0.2,
        }
    }
}

impl RetryPolicy {
    /// Un-jittered delay before retry number `retry` (0-based), capped
    pub fn base_delay(&self, retry: u32) -> Duration {
        let factor = self.multiplier.max(1.0).powi(retry.min(i32::MAX as u32) as i32);
        let millis = self.initial_backoff.as_millis() as f64 * factor;
        let capped = millis.min(self.max_backoff.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }

    /// Jittered delay before retry number `retry`, never above `max_backoff`
    pub fn delay_for(&self, retry: u32) -> Duration {
        let base = self.base_delay(retry);
        if self.jitter <= 0.0 || base.is_zero() {
            return base;
        }
        let spread = self.jitter.min(1.0);
        let factor = rand::thread_rng().gen_range((1.0 - spread)..=(1.0 + spread));
        base.mul_f64(factor).min(self.max_backoff)
    }

    /// Run `operation` under this policy
    ///
    /// # Arguments
    /// * `operation_name` - Name for logging (e.g., "HLTB query 'dead space'")
    /// * `cancel` - Abandons the in-flight attempt or backoff when fired
    /// * `operation` - Closure producing one attempt
    pub async fn run<F, Fut, T, E>(
        &self,
        operation_name: &str,
        cancel: &CancellationToken,
        mut operation: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + std::fmt::Display,
    {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            if cancel.is_cancelled() {
                return Err(RetryError::Cancelled);
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(RetryError::Cancelled),
                outcome = operation() => outcome,
            };

            let err = match outcome {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::debug!(
                            operation = operation_name,
                            attempt,
                            "Operation succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            if !err.is_retryable() {
                tracing::debug!(
                    operation = operation_name,
                    attempt,
                    error = %err,
                    "Non-retryable error, giving up"
                );
                return Err(RetryError::Permanent(err));
            }

            if attempt > self.max_retries {
                tracing::error!(
                    operation = operation_name,
                    attempt,
                    error = %err,
                    "Retries exhausted"
                );
                return Err(RetryError::Exhausted { attempts: attempt, last: err });
            }

            let mut delay = self.delay_for(attempt - 1);
            if let Some(hint) = err.retry_after() {
                delay = delay.max(hint).min(self.max_backoff);
            }

            tracing::warn!(
                operation = operation_name,
                attempt,
                backoff_ms = delay.as_millis() as u64,
                error = %err,
                "Transient error, will retry after backoff"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(RetryError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
