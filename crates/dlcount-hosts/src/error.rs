//! Internal error types for host and catalog requests.
//!
//! These errors are mapped to the core `FetchError` at the port boundary.

use thiserror::Error;

/// Result type alias for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors related to release host and catalog requests.
#[derive(Debug, Error)]
pub enum HostError {
    /// The remote answered with a non-success status.
    #[error("Request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {message}")]
    ClientBuild {
        /// Why construction failed
        message: String,
    },

    /// A base URL cannot have path segments appended.
    #[error("Base URL cannot be extended with a path: {url}")]
    UnusableBaseUrl {
        /// The offending URL
        url: String,
    },

    /// Network or HTTP client error, including timeouts and body decoding.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
