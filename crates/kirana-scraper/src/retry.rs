//! Bounded retry with exponential backoff for transient fetch failures.
//!
//! Wraps a single page fetch; what counts as transient is decided by
//! [`CatalogError::is_transient`] (network failures, 429, 5xx). Deterministic
//! failures (other 4xx, parse errors) are propagated on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

/// Retry policy for one logical operation.
///
/// `max_attempts` counts every try including the first; `1` disables
/// retrying entirely. The delay before attempt `k` (1-indexed, `k > 1`) is
/// `base_delay * 2^(k-2)`, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Executes `operation`, retrying transient failures until it succeeds
    /// or `max_attempts` is exhausted, sleeping the backoff schedule between
    /// attempts. The last error is surfaced after exhaustion.
    ///
    /// # Errors
    ///
    /// Returns the operation's error: immediately for non-transient
    /// failures, after all attempts for transient ones.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, CatalogError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        let mut attempt = 1u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !err.is_transient() || attempt >= self.max_attempts {
                        return Err(err);
                    }

                    let delay = self.backoff_delay(attempt + 1);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_secs = delay.as_secs_f64(),
                        error = %err,
                        "transient fetch error, retrying after backoff"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Delay slept before the given attempt number (1-indexed). Attempt 1
    /// has no delay; attempt 2 waits `base_delay`, attempt 3 twice that,
    /// doubling up to `max_delay`.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        // 2^(attempt-2), exponent clamped to keep the shift in range.
        let factor = 1u32 << (attempt - 2).min(30);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}
