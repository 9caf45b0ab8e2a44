//! Internal error types for the Telegram notifier.

use thiserror::Error;

/// Errors from talking to the Bot API.
///
/// Messages never include the request URL, which embeds the bot token.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// The Bot API rejected the request.
    #[error("Telegram API error{}: {description}", .code.map(|c| format!(" {c}")).unwrap_or_default())]
    Api {
        code: Option<i64>,
        description: String,
    },

    /// The response body was not a Bot API envelope.
    #[error("Unexpected Telegram response (status {status}): {message}")]
    InvalidResponse { status: u16, message: String },

    /// The API base URL cannot be used.
    #[error("Invalid Telegram API base URL: {0}")]
    InvalidUrl(String),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url().to_string())
    }
}

impl From<TelegramError> for dlcount_core::NotifyError {
    fn from(err: TelegramError) -> Self {
        match err {
            TelegramError::InvalidUrl(_) => Self::Configuration {
                message: err.to_string(),
            },
            _ => Self::Delivery {
                message: err.to_string(),
            },
        }
    }
}
