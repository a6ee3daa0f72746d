//! Minimum-interval gate between page fetches
//!
//! The crawl loop marks each page as done and then waits on the limiter
//! before moving on. The limiter knows nothing about fetching, so the same
//! gate could be shared by several fetchers.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Enforces a minimum interval after each completed request
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Minimum time between the end of one request and the next one
    min_interval: Duration,

    /// Timestamp of the last completed request
    last_completed: Option<Instant>,
}

impl RateLimiter {
    /// Creates a limiter with the given interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_completed: None,
        }
    }

    /// Creates a limiter from a delay in seconds
    ///
    /// Negative or non-finite values are treated as zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        let secs = if secs.is_finite() && secs > 0.0 { secs } else { 0.0 };
        Self::new(Duration::from_secs_f64(secs))
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Records that a request just finished
    pub fn record_completion(&mut self) {
        self.last_completed = Some(Instant::now());
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        let last = self.last_completed?;
        let elapsed = now.duration_since(last);
        if elapsed < self.min_interval {
            Some(self.min_interval - elapsed)
        } else {
            None
        }
    }

    /// Waits until the next request is allowed
    ///
    /// Returns early if `cancel` fires while waiting.
    ///
    /// # Returns
    ///
    /// * `true` - The interval elapsed
    /// * `false` - The wait was cut short by cancellation
    pub async fn wait(&self, cancel: &CancellationToken) -> bool {
        let Some(remaining) = self.time_until_ready(Instant::now()) else {
            return !cancel.is_cancelled();
        };

        tokio::select! {
            _ = tokio::time::sleep(remaining) => true,
            _ = cancel.cancelled() => false,
        }
    }
}
