//! Retry strategies for API calls.
//!
//! A [`RetryStrategy`] is a plain value: callers pick a profile
//! ([`RetryStrategy::for_get`] or [`RetryStrategy::for_submit`]) or build
//! one, and hand it the operation to run.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::FetchError;

/// Shape of the wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry.
    Constant,
    /// `base * retry`.
    Linear,
    /// `base * 2^(retry - 1)`.
    Exponential,
}

/// Strategy for retrying failed requests.
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Base delay between retries.
    pub base_delay: Duration,
    /// How the delay grows.
    pub backoff: Backoff,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Time budget for a single attempt.
    pub attempt_timeout: Option<Duration>,
}

impl RetryStrategy {
    /// Creates a new retry strategy with exponential backoff.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_secs(1),
            backoff: Backoff::Exponential,
            max_delay: Duration::from_secs(60),
            attempt_timeout: None,
        }
    }

    /// Profile for read calls: many cheap retries, linear backoff.
    pub fn for_get() -> Self {
        Self {
            max_retries: 10,
            base_delay: Duration::from_millis(500),
            backoff: Backoff::Linear,
            max_delay: Duration::from_secs(10),
            attempt_timeout: Some(Duration::from_secs(30)),
        }
    }

    /// Profile for write calls: fewer retries, exponential backoff.
    pub fn for_submit() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            backoff: Backoff::Exponential,
            max_delay: Duration::from_secs(30),
            attempt_timeout: Some(Duration::from_secs(60)),
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            backoff: Backoff::Constant,
            max_delay: Duration::ZERO,
            attempt_timeout: None,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the backoff shape.
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sets the maximum delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    /// Total attempts this strategy makes before giving up.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Calculates the delay before the given retry (1-based).
    pub fn delay_for_attempt(&self, retry: u32) -> Duration {
        let delay = match self.backoff {
            Backoff::Constant => self.base_delay,
            Backoff::Linear => self.base_delay.saturating_mul(retry.max(1)),
            Backoff::Exponential => {
                let factor = 2u32.saturating_pow(retry.saturating_sub(1));
                self.base_delay.saturating_mul(factor)
            }
        };

        delay.min(self.max_delay)
    }

    /// Runs `operation`, retrying transient failures.
    ///
    /// Non-transient errors are returned unchanged after the first failing
    /// attempt. When the retry budget is spent the last error is wrapped in
    /// [`FetchError::RetriesExhausted`].
    pub async fn execute<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            let result = match self.attempt_timeout {
                Some(limit) => tokio::time::timeout(limit, call())
                    .await
                    .unwrap_or(Err(FetchError::Timeout(limit))),
                None => call().await,
            };

            let error = match result {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation, attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => error,
            };

            if !error.is_transient() {
                debug!(operation, attempt, error = %error, "Non-transient failure");
                return Err(error);
            }

            if attempt > self.max_retries {
                warn!(
                    operation,
                    attempts = attempt,
                    error = %error,
                    "Retry budget exhausted"
                );
                return Err(FetchError::RetriesExhausted {
                    attempts: attempt,
                    source: Box::new(error),
                });
            }

            let mut delay = self.delay_for_attempt(attempt);
            if let Some(requested) = error.retry_after() {
                delay = delay.max(requested);
            }

            warn!(
                operation,
                attempt,
                error = %error,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Transient failure, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::new(3)
    }
}
