//! Partitions: (set, owner) share weights

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::apportion::percentage;
use core_kernel::{OwnerId, PartitionId, SetId};

/// The share weight of one owner inside one charge set
///
/// Weights are tantièmes: arbitrary positive numbers, not necessarily
/// normalized. An owner's ratio for a set is their weight divided by the
/// set's total weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partition {
    /// Unique identifier
    pub id: PartitionId,
    /// The charge set this weight belongs to
    pub set_id: SetId,
    /// The owner holding the weight
    pub owner_id: OwnerId,
    /// Share weight (tantièmes)
    pub weight: Decimal,
}

impl Partition {
    /// Creates a partition with zero weight
    pub fn new(set_id: SetId, owner_id: OwnerId) -> Self {
        Self {
            id: PartitionId::new_v7(),
            set_id,
            owner_id,
            weight: Decimal::ZERO,
        }
    }

    /// This partition's percentage of the set's total weight, 0..100
    ///
    /// A near-zero total degrades to a defined zero ratio.
    pub fn ratio(&self, set_total: Decimal) -> Decimal {
        percentage(self.weight, set_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ratio() {
        let mut p = Partition::new(SetId::new(), OwnerId::new());
        p.weight = dec!(45);
        assert_eq!(p.ratio(dec!(100)), dec!(45));
    }

    #[test]
    fn test_ratio_zero_total() {
        let mut p = Partition::new(SetId::new(), OwnerId::new());
        p.weight = dec!(45);
        assert_eq!(p.ratio(Decimal::ZERO), Decimal::ZERO);
    }
}
