//! Error types shared by the remote data ports.

use thiserror::Error;

/// Errors from fetching remote data (device catalog, release listings).
///
/// Implementation-specific errors (HTTP, JSON) are mapped to these at the
/// adapter boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote answered with a non-success HTTP status.
    #[error("Request failed with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Network, timeout or connectivity error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// The response body was not what the port expects.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// The adapter is misconfigured (bad base URL, etc.).
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Result type alias for remote fetches.
pub type FetchResult<T> = Result<T, FetchError>;

impl FetchError {
    /// HTTP status of the failure, if the remote answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the remote signalled that the request quota is exhausted.
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Status { status: 403 | 429 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_statuses() {
        assert!(FetchError::Status { status: 403 }.is_rate_limited());
        assert!(FetchError::Status { status: 429 }.is_rate_limited());
        assert!(!FetchError::Status { status: 404 }.is_rate_limited());
        assert!(
            !FetchError::Network {
                message: "timed out".to_string()
            }
            .is_rate_limited()
        );
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(FetchError::Status { status: 502 }.status(), Some(502));
        let err = FetchError::InvalidResponse {
            message: "expected an array".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("expected an array"));
    }
}
