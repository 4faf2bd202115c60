//! Fetch error types.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch and update operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A single attempt exceeded its time budget.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Throttled by the store (HTTP 429).
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying, from `Retry-After`.
        retry_after: Option<u64>,
    },

    /// Server-side failure (HTTP 5xx or 408).
    #[error("Server error: HTTP {status}")]
    ServerError {
        /// Response status code.
        status: u16,
    },

    /// Credentials were rejected (HTTP 401/403).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Any other non-success status.
    #[error("Unexpected status code: HTTP {status}")]
    UnexpectedStatus {
        /// Response status code.
        status: u16,
    },

    /// Payload could not be encoded or decoded as XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// An endpoint URL could not be built.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Configuration error.
    #[error("Core error: {0}")]
    Core(#[from] volusion_core::CoreError),

    /// IO error (runtime construction for blocking callers).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The retry budget was spent on transient failures.
    #[error("Gave up after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Total attempts made, including the first.
        attempts: u32,
        /// The last transient failure.
        #[source]
        source: Box<FetchError>,
    },

    /// A paginated fetch returned more non-empty pages than allowed.
    #[error("Pagination exceeded {max_pages} pages")]
    PaginationLimit {
        /// Configured page bound.
        max_pages: usize,
    },
}

impl FetchError {
    /// Returns true if the failure is transient and the call may be repeated.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout() || e.is_request() || e.is_body(),
            Self::Timeout(_) | Self::RateLimited { .. } | Self::ServerError { .. } => true,
            _ => false,
        }
    }

    /// Returns the server-requested wait, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited {
                retry_after: Some(secs),
            } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
