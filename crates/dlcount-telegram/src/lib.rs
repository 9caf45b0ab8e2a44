//! Telegram Bot API notifier.
//!
//! Implements the core `NotifierPort` by posting the report to a chat via
//! `sendMessage`.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod api;
mod config;
mod error;
mod notifier;

pub use config::{DEFAULT_API_BASE, TelegramConfig};
pub use error::TelegramError;
pub use notifier::TelegramNotifier;
