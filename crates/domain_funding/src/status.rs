//! Document workflow states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow state of a call of funds or expense
///
/// Transitions are one-directional: `Building -> Valid -> Ended`. Validation
/// happens exactly once because it is only reachable from `Building`;
/// deletion is permitted only in `Building`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Draft: details may be added, edited, and deleted
    Building,
    /// Validated: fan-out done / entries generated, details frozen
    Valid,
    /// Closed: underlying ledger entries are locked
    Ended,
}

impl DocumentStatus {
    /// Numeric workflow code used in exports and logs
    pub fn as_i32(&self) -> i32 {
        match self {
            DocumentStatus::Building => 0,
            DocumentStatus::Valid => 1,
            DocumentStatus::Ended => 2,
        }
    }

    /// Returns true if detail lines may still be mutated
    pub fn is_editable(&self) -> bool {
        matches!(self, DocumentStatus::Building)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentStatus::Building => "building",
            DocumentStatus::Valid => "valid",
            DocumentStatus::Ended => "ended",
        };
        write!(f, "{label}")
    }
}
