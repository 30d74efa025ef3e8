//! Minimum-interval spacing between catalog requests.
//!
//! The backend throttles per account, not per connection, so one limiter
//! instance is shared by every worker in a run. The lock is held across the
//! sleep so concurrent callers are released one interval apart instead of in
//! a burst.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum delay between consecutive requests.
pub struct RateLimiter {
    min_interval: Duration,
    /// Instant at which the previous `wait` returned. `None` until the
    /// first call, which therefore never blocks.
    last_release: Mutex<Option<Instant>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_release: Mutex::new(None),
        }
    }

    /// Blocks until at least `min_interval` has elapsed since the previous
    /// call to `wait` returned. The first call returns immediately. Never
    /// fails.
    pub async fn wait(&self) {
        let mut last = self.last_release.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
