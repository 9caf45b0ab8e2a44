//! Core services.
//!
//! Services orchestrate between ports and the accounting engine. They know
//! nothing about HTTP, Telegram or the file system.

mod tally_service;

pub use tally_service::{RunOptions, RunSummary, TallyDeps, TallyService};
