//! Store credentials and client configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::CoreError;

// ============================================================================
// Volusion Config
// ============================================================================

/// Connection settings for one Volusion store.
///
/// Read-only once built; every service created from it shares the same
/// credentials, endpoint base, and call delay.
#[derive(Clone, Serialize, Deserialize)]
pub struct VolusionConfig {
    /// Store host, e.g. `www.myshop.com`.
    pub shop_domain: String,
    /// API login (the store admin e-mail).
    pub user_name: String,
    /// Encrypted API password from the store's API settings page.
    pub encrypted_password: String,
    /// Overrides the `https://{shop_domain}` endpoint base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Pause after every successful API call, in milliseconds.
    #[serde(default = "default_api_delay_ms")]
    pub api_delay_ms: u64,
    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound on non-empty pages in one paginated fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,
}

fn default_api_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl VolusionConfig {
    /// Creates a validated configuration with default tuning.
    pub fn new(
        shop_domain: impl Into<String>,
        user_name: impl Into<String>,
        encrypted_password: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let config = Self {
            shop_domain: shop_domain.into(),
            user_name: user_name.into(),
            encrypted_password: encrypted_password.into(),
            base_url: None,
            api_delay_ms: default_api_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            max_pages: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Points the client at a different scheme and host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the post-call delay.
    pub fn with_api_delay(mut self, delay: Duration) -> Self {
        self.api_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Bounds the number of non-empty pages a paginated fetch accepts.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Checks that credentials are present and the endpoint base resolves.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("shop_domain", &self.shop_domain),
            ("user_name", &self.user_name),
            ("encrypted_password", &self.encrypted_password),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidConfig(format!("{field} must not be empty")));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(CoreError::InvalidConfig(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.max_pages == Some(0) {
            return Err(CoreError::InvalidConfig(
                "max_pages must be greater than zero".to_string(),
            ));
        }

        self.base_url().map(|_| ())
    }

    /// Resolves the endpoint base (scheme and host).
    pub fn base_url(&self) -> Result<Url, CoreError> {
        let raw = match &self.base_url {
            Some(url) => url.clone(),
            None if self.shop_domain.contains("://") => self.shop_domain.clone(),
            None => format!("https://{}", self.shop_domain.trim()),
        };

        let url = Url::parse(&raw)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::InvalidConfig(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(CoreError::InvalidConfig(format!("no host in {raw}")));
        }

        Ok(url)
    }

    /// Returns the post-call delay.
    pub fn api_delay(&self) -> Duration {
        Duration::from_millis(self.api_delay_ms)
    }

    /// Returns the per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("volusion")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads and validates configuration from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        debug!(path = %path.display(), "Reading configuration");

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        info!(path = %path.display(), shop = %config.shop_domain, "Loaded configuration");
        Ok(config)
    }
}

impl fmt::Debug for VolusionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolusionConfig")
            .field("shop_domain", &self.shop_domain)
            .field("user_name", &self.user_name)
            .field("encrypted_password", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_delay_ms", &self.api_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_defaults() {
        let config = VolusionConfig::new("www.myshop.com", "admin@myshop.com", "secret").unwrap();

        assert_eq!(config.api_delay(), Duration::from_millis(500));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_pages, None);
        assert_eq!(config.base_url().unwrap().as_str(), "https://www.myshop.com/");
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            VolusionConfig::new("www.myshop.com", "", "secret"),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(matches!(
            VolusionConfig::new("www.myshop.com", "admin", "   "),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(VolusionConfig::new("", "admin", "secret").is_err());
    }

    #[test]
    fn test_base_url_override() {
        let config = VolusionConfig::new("www.myshop.com", "admin", "secret")
            .unwrap()
            .with_base_url("http://127.0.0.1:8080");

        assert_eq!(config.base_url().unwrap().as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_shop_domain_with_scheme() {
        let config = VolusionConfig::new("http://shop.local", "admin", "secret").unwrap();
        assert_eq!(config.base_url().unwrap().scheme(), "http");
    }

    #[test]
    fn test_unsupported_scheme() {
        let config = VolusionConfig::new("www.myshop.com", "admin", "secret")
            .unwrap()
            .with_base_url("ftp://www.myshop.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let config = VolusionConfig::new("www.myshop.com", "admin", "secret")
            .unwrap()
            .with_max_pages(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = VolusionConfig::new("www.myshop.com", "admin", "hunter2").unwrap();
        let printed = format!("{config:?}");

        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }
}
