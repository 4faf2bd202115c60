//! HTTP transport.
//!
//! [`Transport`] is the seam between the product operations and the
//! network. [`HttpTransport`] is the reqwest-backed implementation; tests
//! substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, header};
use tracing::{debug, instrument};
use url::Url;

use crate::endpoints::redact;
use crate::error::FetchError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for API calls.
const USER_AGENT: &str = concat!("volusion-fetch/", env!("CARGO_PKG_VERSION"));

/// Content type the web service expects for imports.
const IMPORT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Header that marks a request as an API import.
const CONTENT_ACTION: &str = "Content-Action";

// ============================================================================
// Transport Trait
// ============================================================================

/// A single remote call, with no retry or pacing of its own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url` and returns the body, or `None` when the body is empty.
    async fn get(&self, url: &Url) -> Result<Option<String>, FetchError>;

    /// Posts an XML document to `url`.
    async fn post(&self, url: &Url, body: &str) -> Result<(), FetchError>;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Creates a transport with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { inner: client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, url), fields(url = %redact(url)))]
    async fn get(&self, url: &Url) -> Result<Option<String>, FetchError> {
        debug!("GET request");

        let response = self.inner.get(url.clone()).send().await?;
        debug!(status = %response.status(), "Response received");

        let body = check_status(response)?.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(body))
    }

    #[instrument(skip(self, url, body), fields(url = %redact(url), bytes = body.len()))]
    async fn post(&self, url: &Url, body: &str) -> Result<(), FetchError> {
        debug!("POST request");

        let response = self
            .inner
            .post(url.clone())
            .header(header::CONTENT_TYPE, IMPORT_CONTENT_TYPE)
            .header(CONTENT_ACTION, "Volusion_API")
            .body(body.to_owned())
            .send()
            .await?;
        debug!(status = %response.status(), "Response received");

        check_status(response)?;
        Ok(())
    }
}

/// Maps a non-success status onto the error taxonomy.
fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(match status {
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited {
            retry_after: response.retry_after_secs(),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::AuthenticationFailed(
            format!("HTTP {}: login or encrypted password rejected", status.as_u16()),
        ),
        s if s.is_server_error() || s == StatusCode::REQUEST_TIMEOUT => {
            FetchError::ServerError { status: s.as_u16() }
        }
        s => FetchError::UnexpectedStatus { status: s.as_u16() },
    })
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Extension trait for Response handling.
pub trait ResponseExt {
    /// Get the Retry-After header value in seconds.
    fn retry_after_secs(&self) -> Option<u64>;
}

impl ResponseExt for Response {
    fn retry_after_secs(&self) -> Option<u64> {
        self.headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }
}

// ============================================================================
// Tests
// ============================================================================
