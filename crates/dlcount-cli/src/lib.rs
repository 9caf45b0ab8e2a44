//! `dlcount` command-line adapter.
//!
//! Parses arguments, loads `config.env`, wires the HTTP, Telegram and file
//! adapters into the core tally service and maps failures to exit codes.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Runtime is only started by the binary
use tokio as _;

pub mod bootstrap;
pub mod env;
pub mod error;
pub mod logging;
pub mod parser;
pub mod run;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use error::CliError;
pub use parser::Cli;
pub use run::execute;
