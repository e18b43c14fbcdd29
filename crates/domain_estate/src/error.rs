//! Estate domain errors

use thiserror::Error;

/// Errors that can occur in the estate domain
#[derive(Debug, Error)]
pub enum EstateError {
    /// Owner not found
    #[error("Owner not found: {0}")]
    OwnerNotFound(String),

    /// Charge set not found
    #[error("Charge set not found: {0}")]
    SetNotFound(String),

    /// Partition not found
    #[error("No partition for owner {owner} in set {set}")]
    PartitionNotFound { owner: String, set: String },

    /// Validation failed (e.g. malformed contact data)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Deletion refused because financial history exists
    #[error("{0} cannot be deleted: financial history exists")]
    HasFinancialHistory(String),
}
