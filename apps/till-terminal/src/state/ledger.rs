//! # Ledger State
//!
//! Holds the open [`Ledger`] for the commands.

use till_db::Ledger;

/// Wrapper around `Ledger` handed to every command.
///
/// Created at process start, closed at process end by the shell.
#[derive(Debug, Clone)]
pub struct LedgerState {
    ledger: Ledger,
}

impl LedgerState {
    pub fn new(ledger: Ledger) -> Self {
        LedgerState { ledger }
    }

    /// Returns a reference to the inner Ledger.
    pub fn inner(&self) -> &Ledger {
        &self.ledger
    }
}
