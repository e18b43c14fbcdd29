//! Error types for the accounting crate.

use core_kernel::{CoreError, MoneyError};
use domain_estate::EstateError;
use domain_funding::FundingError;
use domain_ledger::LedgerError;
use thiserror::Error;

/// Errors raised while orchestrating accounting operations.
#[derive(Debug, Error)]
pub enum AccountingError {
    /// The system is not configured well enough to perform the operation,
    /// e.g. no jurisdiction selected or an account code missing from the chart.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Ledger error: {0}")]
    Ledger(LedgerError),

    #[error("Kernel error: {0}")]
    Core(CoreError),

    #[error("Funding error: {0}")]
    Funding(#[from] FundingError),

    #[error("Estate error: {0}")]
    Estate(#[from] EstateError),
}

// An account code that the jurisdiction or a charge set points at but the
// chart does not contain is a setup problem, not a ledger defect.
impl From<LedgerError> for AccountingError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound(code) => {
                AccountingError::Configuration(format!("account '{code}' is not in the chart"))
            }
            other => AccountingError::Ledger(other),
        }
    }
}

// Same reasoning for parameters: a missing parameter means the jurisdiction
// was never initialized.
impl From<CoreError> for AccountingError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownParameter(name) => {
                AccountingError::Configuration(format!("parameter '{name}' is not set"))
            }
            other => AccountingError::Core(other),
        }
    }
}

impl From<MoneyError> for AccountingError {
    fn from(err: MoneyError) -> Self {
        AccountingError::Core(CoreError::Money(err))
    }
}

impl From<::config::ConfigError> for AccountingError {
    fn from(err: ::config::ConfigError) -> Self {
        AccountingError::Configuration(err.to_string())
    }
}
