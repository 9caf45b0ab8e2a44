//! Notification port.
//!
//! Delivery is best-effort: callers log failures and move on.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The message could not be delivered.
    #[error("Failed to deliver notification: {message}")]
    Delivery {
        /// Why delivery failed
        message: String,
    },

    /// The notifier is misconfigured.
    #[error("Notifier configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Sends a plain-text report to a configured destination.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotifierPort: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
