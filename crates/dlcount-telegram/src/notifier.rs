//! `NotifierPort` implementation over the Bot API.

use async_trait::async_trait;
use dlcount_core::{NotifierPort, NotifyError};
use url::Url;

use crate::api::{SendMessage, check_response, send_message_url};
use crate::config::TelegramConfig;
use crate::error::TelegramError;

/// Sends reports to one Telegram chat.
pub struct TelegramNotifier {
    client: reqwest::Client,
    url: Url,
    chat_id: String,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    /// Create a notifier from its configuration.
    pub fn new(config: &TelegramConfig) -> Result<Self, TelegramError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            url: send_message_url(&config.api_base, &config.bot_token)?,
            chat_id: config.chat_id.clone(),
        })
    }

    async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        check_response(status, &body)
    }
}

#[async_trait]
impl NotifierPort for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        tracing::debug!(chat_id = %self.chat_id, chars = text.len(), "Sending report to Telegram");
        self.send_message(text).await.map_err(NotifyError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_notifier_creation() {
        let notifier = TelegramNotifier::new(&TelegramConfig::new("123:abc", "-100200")).unwrap();
        assert_eq!(notifier.chat_id, "-100200");
        assert_eq!(
            notifier.url.as_str(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let notifier = TelegramNotifier::new(&TelegramConfig::new("123:abc", "42")).unwrap();
        assert!(!format!("{notifier:?}").contains("123:abc"));
    }

    #[test]
    fn test_bad_api_base_is_rejected() {
        let config = TelegramConfig::new("123:abc", "42").with_api_base("nope");
        assert!(matches!(
            TelegramNotifier::new(&config),
            Err(TelegramError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_a_delivery_error() {
        // Port 9 (discard) on localhost is not listening in test environments.
        let config = TelegramConfig::new("123:abc", "42")
            .with_api_base("http://127.0.0.1:9")
            .with_timeout(std::time::Duration::from_secs(2));
        let notifier: Arc<dyn NotifierPort> = Arc::new(TelegramNotifier::new(&config).unwrap());

        let err = notifier.send("hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::Delivery { .. }));
        assert!(!err.to_string().contains("123:abc"));
    }
}
