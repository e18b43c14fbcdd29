//! Charge sets (classes of charges)

use serde::{Deserialize, Serialize};

use core_kernel::{Money, SetId};

/// Whether a class of charges funds current or exceptional expenses
///
/// The distinction drives which revenue account the jurisdiction posts to and,
/// for some jurisdictions, whether expense revenue is ratio-split per owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadKind {
    /// Recurring maintenance charges
    Current,
    /// One-off works (e.g. roof renovation)
    Exceptional,
}

/// A class of charges: the grouping key for call-of-funds and expense details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeSet {
    /// Unique identifier
    pub id: SetId,
    /// Display name
    pub name: String,
    /// Budget amount for the period
    pub budget: Money,
    /// Revenue account code credited when calls of funds are posted
    pub revenue_code: String,
    /// Optional cost-center code; sets with different cost centers are
    /// posted in separate entries to keep cost accounting partitioned
    pub cost_center: Option<String>,
    /// Current vs exceptional
    pub kind: LoadKind,
    /// Whether this set still participates in new documents
    pub is_active: bool,
}

impl ChargeSet {
    /// Creates a new active charge set
    pub fn new(
        name: impl Into<String>,
        budget: Money,
        revenue_code: impl Into<String>,
        kind: LoadKind,
    ) -> Self {
        Self {
            id: SetId::new_v7(),
            name: name.into(),
            budget,
            revenue_code: revenue_code.into(),
            cost_center: None,
            kind,
            is_active: true,
        }
    }

    /// Sets the cost-center code
    pub fn with_cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.cost_center = Some(cost_center.into());
        self
    }

    /// Deactivates the set
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_set_is_active() {
        let set = ChargeSet::new(
            "General maintenance",
            Money::new(dec!(1200), Currency::EUR),
            "701",
            LoadKind::Current,
        );
        assert!(set.is_active);
        assert!(set.cost_center.is_none());
    }

    #[test]
    fn test_cost_center_builder() {
        let set = ChargeSet::new(
            "Roof works",
            Money::new(dec!(10000), Currency::EUR),
            "702",
            LoadKind::Exceptional,
        )
        .with_cost_center("BUILDING-A");
        assert_eq!(set.cost_center.as_deref(), Some("BUILDING-A"));
    }
}
