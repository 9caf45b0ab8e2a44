//! Notifier configuration.

use std::fmt;
use std::time::Duration;

/// Telegram Bot API root.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Configuration for [`crate::TelegramNotifier`].
#[derive(Clone)]
pub struct TelegramConfig {
    pub(crate) bot_token: String,
    pub(crate) chat_id: String,
    pub(crate) api_base: String,
    pub(crate) timeout: Duration,
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TelegramConfig {
    /// Send to `chat_id` as the bot identified by `bot_token`.
    #[must_use]
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the Bot API root.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&dlcount_core::TelegramTarget> for TelegramConfig {
    fn from(target: &dlcount_core::TelegramTarget) -> Self {
        Self::new(target.bot_token.clone(), target.chat_id.clone())
    }
}
