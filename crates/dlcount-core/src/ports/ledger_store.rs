//! Ledger persistence port.

use crate::ledger::{Ledger, LedgerError, LedgerKind};

/// Loads and saves the two ledgers.
///
/// Loading a ledger that was never saved yields an empty ledger.
pub trait LedgerStore: Send + Sync {
    fn load(&self, kind: LedgerKind) -> Result<Ledger, LedgerError>;

    fn save(&self, kind: LedgerKind, ledger: &Ledger) -> Result<(), LedgerError>;
}
