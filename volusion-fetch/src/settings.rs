//! Tuning for product operations.

use std::time::Duration;

use volusion_core::VolusionConfig;

use crate::retry::RetryStrategy;

/// Settings shared by every operation of one service.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// HTTP timeout for the default transport.
    pub timeout: Duration,
    /// Pause after every successful call.
    pub api_delay: Duration,
    /// Retry policy for reads.
    pub get_retry: RetryStrategy,
    /// Retry policy for writes.
    pub submit_retry: RetryStrategy,
    /// Upper bound on non-empty pages in one paginated fetch.
    pub max_pages: Option<usize>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            api_delay: Duration::from_millis(500),
            get_retry: RetryStrategy::for_get(),
            submit_retry: RetryStrategy::for_submit(),
            max_pages: None,
        }
    }
}

impl FetchSettings {
    /// Creates settings from store configuration with the default retry profiles.
    pub fn from_config(config: &VolusionConfig) -> Self {
        Self {
            timeout: config.request_timeout(),
            api_delay: config.api_delay(),
            max_pages: config.max_pages,
            ..Default::default()
        }
    }

    /// Sets the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the post-call delay.
    pub fn with_api_delay(mut self, delay: Duration) -> Self {
        self.api_delay = delay;
        self
    }

    /// Sets the read retry policy.
    pub fn with_get_retry(mut self, strategy: RetryStrategy) -> Self {
        self.get_retry = strategy;
        self
    }

    /// Sets the write retry policy.
    pub fn with_submit_retry(mut self, strategy: RetryStrategy) -> Self {
        self.submit_retry = strategy;
        self
    }

    /// Bounds paginated fetches.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = VolusionConfig::new("www.myshop.com", "admin", "secret")
            .unwrap()
            .with_api_delay(Duration::from_secs(2))
            .with_max_pages(50);

        let settings = FetchSettings::from_config(&config);
        assert_eq!(settings.api_delay, Duration::from_secs(2));
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.max_pages, Some(50));
        assert_eq!(settings.get_retry.max_retries, 10);
        assert_eq!(settings.submit_retry.max_retries, 3);
    }

    #[test]
    fn test_overrides() {
        let settings = FetchSettings::default()
            .with_get_retry(RetryStrategy::no_retry())
            .with_api_delay(Duration::ZERO);

        assert_eq!(settings.get_retry.max_attempts(), 1);
        assert!(settings.api_delay.is_zero());
    }
}
