//! Bot API request and response shapes.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TelegramError;

/// Body of a `sendMessage` call. The text is sent as plain text.
#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
}

/// Envelope every Bot API response is wrapped in.
#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    description: Option<String>,
}

/// `{api_base}/bot{token}/sendMessage`.
pub fn send_message_url(api_base: &str, bot_token: &str) -> Result<Url, TelegramError> {
    let invalid = || TelegramError::InvalidUrl(api_base.to_string());

    let mut url = Url::parse(api_base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .push(&format!("bot{bot_token}"))
        .push("sendMessage");
    Ok(url)
}

/// Interpret a Bot API response.
///
/// The envelope's `ok` flag decides success; the HTTP status only matters
/// when the body is not an envelope.
pub fn check_response(status: u16, body: &str) -> Result<(), TelegramError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| TelegramError::InvalidResponse {
            status,
            message: e.to_string(),
        })?;

    if envelope.ok {
        return Ok(());
    }

    Err(TelegramError::Api {
        code: envelope.error_code,
        description: envelope
            .description
            .unwrap_or_else(|| format!("request failed with status {status}")),
    })
}
