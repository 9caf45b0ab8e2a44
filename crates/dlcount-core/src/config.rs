//! Run configuration.
//!
//! Built once at startup from the process environment (after `config.env`
//! has been loaded) and passed down explicitly. Nothing below the composition
//! root reads the environment.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::domain::AssetFilter;

/// Bearer token for the primary release host.
pub const ENV_GITHUB_TOKEN: &str = "GH_KEY";
/// Telegram bot token.
pub const ENV_TELEGRAM_TOKEN: &str = "TG_BOT_TOKEN";
/// Telegram chat receiving the report.
pub const ENV_TELEGRAM_CHAT: &str = "TG_CHAT_ID";
/// Override for the device catalog URL.
pub const ENV_DEVICES_URL: &str = "DLCOUNT_DEVICES_URL";
/// Override for the release host request timeout, in seconds.
pub const ENV_HOST_TIMEOUT: &str = "DLCOUNT_HOST_TIMEOUT_SECS";

/// Default device catalog.
pub const DEFAULT_DEVICES_URL: &str =
    "https://raw.githubusercontent.com/PixelBuildsROM/pixelbuilds_devices/main/devices.json";

/// Default timeout for release host requests.
pub const DEFAULT_HOST_TIMEOUT: Duration = Duration::from_secs(3);

/// Configuration errors.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Destination for the report notification.
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramTarget {
    pub bot_token: String,
    pub chat_id: String,
}

impl fmt::Debug for TelegramTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramTarget")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Configuration for one tally run.
#[derive(Clone)]
pub struct AppConfig {
    /// Optional bearer token for the primary host.
    pub github_token: Option<String>,
    /// Notification destination; `None` disables notifications.
    pub telegram: Option<TelegramTarget>,
    pub devices_url: String,
    pub host_timeout: Duration,
    pub asset_filter: AssetFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            telegram: None,
            devices_url: DEFAULT_DEVICES_URL.to_string(),
            host_timeout: DEFAULT_HOST_TIMEOUT,
            asset_filter: AssetFilter::default(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("telegram", &self.telegram)
            .field("devices_url", &self.devices_url)
            .field("host_timeout", &self.host_timeout)
            .field("asset_filter", &self.asset_filter)
            .finish()
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a key lookup.
    ///
    /// Empty values are treated as absent. Notifications are enabled only
    /// when both the bot token and the chat id are present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let telegram = match (get(ENV_TELEGRAM_TOKEN), get(ENV_TELEGRAM_CHAT)) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramTarget { bot_token, chat_id }),
            _ => None,
        };

        let host_timeout = match get(ENV_HOST_TIMEOUT) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_HOST_TIMEOUT,
        };

        Ok(Self {
            github_token: get(ENV_GITHUB_TOKEN),
            telegram,
            devices_url: get(ENV_DEVICES_URL).unwrap_or_else(|| DEFAULT_DEVICES_URL.to_string()),
            host_timeout,
            asset_filter: AssetFilter::default(),
        })
    }

    pub const fn notifications_enabled(&self) -> bool {
        self.telegram.is_some()
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: ENV_HOST_TIMEOUT.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("timeout must be at least one second"));
    }
    Ok(Duration::from_secs(secs))
}
