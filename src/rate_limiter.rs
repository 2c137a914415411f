//! Minimum-interval pacing for requests to arXiv.
//!
//! arXiv's acceptable-use policy asks automated clients to leave a few seconds
//! between consecutive requests. Each client ([`FeedClient`](crate::feed::FeedClient),
//! [`PaperDownloader`](crate::download::PaperDownloader)) owns its own
//! [`RateLimiter`] value; there is no process-wide state.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use paper_extractor_core::RateLimiter;
//!
//! # async fn example() {
//! let mut limiter = RateLimiter::new(Duration::from_secs(3));
//!
//! // First request proceeds immediately
//! limiter.acquire().await;
//!
//! // Second request waits until three seconds have passed since the first
//! limiter.acquire().await;
//! # }
//! ```

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, instrument, warn};

/// Warning threshold for cumulative delay over one client's lifetime.
const CUMULATIVE_DELAY_WARNING_THRESHOLD: Duration = Duration::from_secs(30);

/// Enforces a minimum interval between consecutive requests of one client.
///
/// The limiter is a plain value: callers hold it by `&mut` and every
/// [`acquire`](Self::acquire) call reads and updates the time of the previous
/// request.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Minimum time between the start of two requests.
    min_interval: Duration,

    /// Time of the previous request. `None` until the first request, which is
    /// never delayed.
    last_request: Option<Instant>,

    /// Total delay applied so far, used to warn about excessive pacing.
    cumulative_delay: Duration,

    /// Whether the cumulative delay warning was already emitted.
    warned: bool,
}

impl RateLimiter {
    /// Creates a limiter that spaces requests at least `min_interval` apart.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
            cumulative_delay: Duration::ZERO,
            warned: false,
        }
    }

    /// Returns whether pacing is disabled (`--rate-limit 0`).
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.min_interval.is_zero()
    }

    /// Returns the configured minimum interval.
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Returns the total delay applied by this limiter so far.
    #[must_use]
    pub fn cumulative_delay(&self) -> Duration {
        self.cumulative_delay
    }

    /// Returns how long a request issued at `now` would have to wait.
    #[must_use]
    pub fn required_delay(&self, now: Instant) -> Duration {
        match self.last_request {
            None => Duration::ZERO,
            Some(last) => self
                .min_interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }

    /// Waits until a request may be issued, then records it.
    ///
    /// Returns the delay that was applied.
    #[instrument(level = "debug", skip(self), fields(min_interval_ms = self.min_interval.as_millis()))]
    pub async fn acquire(&mut self) -> Duration {
        if self.is_disabled() {
            return Duration::ZERO;
        }

        let delay = self.required_delay(Instant::now());

        if delay.is_zero() {
            if self.last_request.is_none() {
                debug!("first request - no delay");
            }
        } else {
            self.cumulative_delay = self.cumulative_delay.saturating_add(delay);
            debug!(
                delay_ms = delay.as_millis(),
                cumulative_ms = self.cumulative_delay.as_millis(),
                "applying rate limit delay"
            );

            if !self.warned && self.cumulative_delay >= CUMULATIVE_DELAY_WARNING_THRESHOLD {
                self.warned = true;
                warn!(
                    cumulative_delay_secs = self.cumulative_delay.as_secs(),
                    "excessive rate limiting - consider requesting fewer papers per run"
                );
            }

            tokio::time::sleep(delay).await;
        }

        self.last_request = Some(Instant::now());
        delay
    }
}
