//! Download accounting core for PixelBuilds release assets.
//!
//! Holds the domain types, the two JSON ledgers, the per-run tally engine and
//! the port traits the host, catalog and notification adapters implement.
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ledger;
pub mod ports;
pub mod report;
pub mod services;
pub mod tally;

pub use config::{AppConfig, ConfigError, TelegramTarget};
pub use domain::{Asset, AssetFilter, Device, Release};
pub use ledger::{
    DATE_FORMAT, DeviceEntry, JsonLedgerStore, Ledger, LedgerError, LedgerKind, LedgerSummary,
};
pub use ports::{
    CoreError, DeviceCatalogPort, FetchError, FetchResult, LedgerStore, NotifierPort,
    NotifyError, ReleaseHostPort,
};
pub use report::{DeviceLine, Report, TotalLine};
pub use services::{RunOptions, RunSummary, TallyDeps, TallyService};
pub use tally::{DeviceOutcome, HostListing, Tally, TallyOutcome};
