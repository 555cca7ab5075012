//! # Application State
//!
//! What the shell holds for the lifetime of the process.
//!
//! - [`LedgerState`] - The open ledger, created once at startup
//! - [`ConfigState`] - Store name, currency display, database location

mod config;
mod ledger;

pub use config::ConfigState;
pub use ledger::LedgerState;
