//! Ledger error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while decoding, loading or saving a ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A key in the flat ledger document holds an unusable value.
    #[error("Invalid ledger entry '{key}': {reason}")]
    InvalidEntry { key: String, reason: String },

    /// The ledger file exists but could not be read.
    #[error("Failed to read ledger {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// The ledger file is not a valid ledger document.
    #[error("Malformed ledger {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The ledger could not be written.
    #[error("Failed to write ledger {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

impl LedgerError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
