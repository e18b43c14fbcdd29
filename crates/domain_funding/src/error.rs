//! Funding domain errors

use thiserror::Error;

use core_kernel::MoneyError;
use domain_estate::EstateError;

use crate::status::DocumentStatus;

/// Errors that can occur in the funding domain
#[derive(Debug, Error)]
pub enum FundingError {
    /// Call of funds not found
    #[error("Call of funds not found: {0}")]
    CallNotFound(String),

    /// Expense not found
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    /// Detail line not found
    #[error("Detail not found: {0}")]
    DetailNotFound(String),

    /// A workflow transition or edit was attempted in the wrong state
    #[error("Cannot {action} a document in {status} state")]
    WorkflowViolation {
        action: &'static str,
        status: DocumentStatus,
    },

    /// Deletion refused outside the draft state
    #[error("{document} cannot be deleted")]
    CannotDelete { document: &'static str },

    /// Estate error
    #[error("Estate error: {0}")]
    Estate(#[from] EstateError),

    /// Money error
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl FundingError {
    pub fn workflow(action: &'static str, status: DocumentStatus) -> Self {
        FundingError::WorkflowViolation { action, status }
    }
}
