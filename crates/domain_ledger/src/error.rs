//! Ledger domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Account not found in the chart of accounts
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account already exists
    #[error("Account already exists: {0}")]
    AccountAlreadyExists(String),

    /// Entry not found
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Entry is closed and cannot be modified
    #[error("Entry is closed: {0}")]
    EntryClosed(String),

    /// Entry is not balanced; this indicates a bug in the apportionment math
    #[error("Unbalanced entry: debits={debits}, credits={credits}")]
    UnbalancedEntry { debits: Decimal, credits: Decimal },

    /// Money error
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
