//! JSON file implementation of the ledger store.

use std::fs;
use std::path::PathBuf;

use super::{Ledger, LedgerError, LedgerKind};
use crate::ports::LedgerStore;

/// Stores both ledgers as JSON documents inside one directory.
///
/// A missing file loads as an empty ledger. Saves go through a sibling
/// temporary file that is renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    dir: PathBuf,
}

impl JsonLedgerStore {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of a ledger file.
    pub fn path(&self, kind: LedgerKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

impl LedgerStore for JsonLedgerStore {
    fn load(&self, kind: LedgerKind) -> Result<Ledger, LedgerError> {
        let path = self.path(kind);

        if !path.exists() {
            tracing::info!(path = %path.display(), "No {kind} ledger yet, starting empty");
            return Ok(Ledger::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| LedgerError::Read {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if content.trim().is_empty() {
            return Ok(Ledger::new());
        }

        serde_json::from_str(&content).map_err(|e| LedgerError::Parse {
            path,
            reason: e.to_string(),
        })
    }

    fn save(&self, kind: LedgerKind, ledger: &Ledger) -> Result<(), LedgerError> {
        let path = self.path(kind);
        let write_err = |reason: String| LedgerError::Write {
            path: path.clone(),
            reason,
        };

        let json = ledger.to_json_pretty().map_err(|e| write_err(e.to_string()))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| write_err(e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| write_err(e.to_string()))?;

        tracing::debug!(path = %path.display(), "Wrote {kind} ledger");
        Ok(())
    }
}
