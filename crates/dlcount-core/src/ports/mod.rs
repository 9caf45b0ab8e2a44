//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the accounting core expects from
//! infrastructure. They contain no HTTP or Telegram details and use only
//! domain types.

pub mod catalog;
pub mod fetch;
pub mod ledger_store;
pub mod notifier;
pub mod release_host;

use thiserror::Error;

pub use catalog::DeviceCatalogPort;
pub use fetch::{FetchError, FetchResult};
pub use ledger_store::LedgerStore;
pub use notifier::{NotifierPort, NotifyError};
pub use release_host::ReleaseHostPort;

use crate::ledger::LedgerError;

/// Errors that abort a tally run.
///
/// Per-device source failures are not errors; they end up in the skip list.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The primary host exhausted the request quota.
    #[error("Rate limited by {host} while fetching {codename} (status {status})")]
    RateLimited {
        host: String,
        codename: String,
        status: u16,
    },

    /// The device catalog could not be fetched.
    #[error("Failed to fetch device catalog: {0}")]
    Catalog(#[source] FetchError),

    /// A ledger could not be loaded or saved.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
