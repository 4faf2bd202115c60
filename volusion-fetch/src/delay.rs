//! Post-call pacing.
//!
//! The store API restricts call frequency, so every successful call is
//! followed by a fixed pause before the next one may start.

use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

/// Pause applied after each successful remote call.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Waits until the next call may be issued.
    async fn wait(&self);
}

/// Fixed-duration pause.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    duration: Duration,
}

impl FixedDelay {
    /// Creates a limiter that sleeps for `duration` after every call.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Returns the configured pause.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn wait(&self) {
        if self.duration.is_zero() {
            return;
        }
        trace!(delay = ?self.duration, "API delay");
        tokio::time::sleep(self.duration).await;
    }
}
