//! CLI error type and exit codes.

use dlcount_core::{ConfigError, CoreError, LedgerError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The primary release host refused further requests.
    #[error("{0}")]
    RateLimited(String),

    /// A ledger file could not be read or written.
    #[error("IO error: {0}")]
    Io(String),

    /// A ledger file exists but does not hold a valid ledger.
    #[error("Data error: {0}")]
    Data(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other failure that aborts the run.
    #[error("{0}")]
    Core(String),
}

impl CliError {
    /// Map error to exit code.
    ///
    /// Exit codes follow sysexits.h:
    /// - 1: General error
    /// - 65: Malformed ledger (`EX_DATAERR`)
    /// - 74: Ledger I/O (`EX_IOERR`)
    /// - 75: Rate limited, retry later (`EX_TEMPFAIL`)
    /// - 78: Configuration (`EX_CONFIG`)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Data(_) => 65,
            Self::Io(_) => 74,
            Self::RateLimited(_) => 75,
            Self::Config(_) => 78,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RateLimited { .. } => Self::RateLimited(err.to_string()),
            CoreError::Catalog(_) => Self::Core(err.to_string()),
            CoreError::Ledger(ledger_err) => ledger_err.into(),
        }
    }
}

impl From<LedgerError> for CliError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Read { .. } | LedgerError::Write { .. } => Self::Io(err.to_string()),
            LedgerError::Parse { .. } | LedgerError::InvalidEntry { .. } => {
                Self::Data(err.to_string())
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
