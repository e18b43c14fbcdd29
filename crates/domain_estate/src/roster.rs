//! The estate roster aggregate
//!
//! Owns owners, charge sets, and partitions, and maintains the invariant that
//! exactly one partition row exists per (owner, set) pair.
//! [`EstateRoster::sync_partitions`] is an explicit, idempotent maintenance
//! operation invoked after every owner or set creation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::apportion::{percentage, Share};
use core_kernel::{OwnerId, SetId};

use crate::error::EstateError;
use crate::owner::Owner;
use crate::partition::Partition;
use crate::set::ChargeSet;

/// Master-data aggregate for one condominium
#[derive(Debug, Default)]
pub struct EstateRoster {
    owners: BTreeMap<OwnerId, Owner>,
    sets: BTreeMap<SetId, ChargeSet>,
    partitions: Vec<Partition>,
}

impl EstateRoster {
    /// Creates an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an owner after validating contact data, then synchronizes partitions
    pub fn add_owner(&mut self, owner: Owner) -> Result<OwnerId, EstateError> {
        owner.check()?;
        let id = owner.id;
        self.owners.insert(id, owner);
        self.sync_partitions();
        Ok(id)
    }

    /// Adds a charge set, then synchronizes partitions
    pub fn add_set(&mut self, set: ChargeSet) -> SetId {
        let id = set.id;
        self.sets.insert(id, set);
        self.sync_partitions();
        id
    }

    /// Creates the missing partition rows so every (owner, set) pair has one
    ///
    /// Idempotent; new rows start with zero weight. Returns the number of
    /// rows created.
    pub fn sync_partitions(&mut self) -> usize {
        let mut created = 0;
        for set_id in self.sets.keys().copied().collect::<Vec<_>>() {
            for owner_id in self.owners.keys().copied().collect::<Vec<_>>() {
                let exists = self
                    .partitions
                    .iter()
                    .any(|p| p.set_id == set_id && p.owner_id == owner_id);
                if !exists {
                    self.partitions.push(Partition::new(set_id, owner_id));
                    created += 1;
                }
            }
        }
        if created > 0 {
            debug!(created, "partition rows synchronized");
        }
        created
    }

    /// Returns an owner by id
    pub fn owner(&self, id: OwnerId) -> Result<&Owner, EstateError> {
        self.owners
            .get(&id)
            .ok_or_else(|| EstateError::OwnerNotFound(id.to_string()))
    }

    /// Returns a mutable owner by id
    pub fn owner_mut(&mut self, id: OwnerId) -> Result<&mut Owner, EstateError> {
        self.owners
            .get_mut(&id)
            .ok_or_else(|| EstateError::OwnerNotFound(id.to_string()))
    }

    /// Iterates owners in stable id order
    pub fn owners(&self) -> impl Iterator<Item = &Owner> {
        self.owners.values()
    }

    /// Returns a charge set by id
    pub fn set(&self, id: SetId) -> Result<&ChargeSet, EstateError> {
        self.sets
            .get(&id)
            .ok_or_else(|| EstateError::SetNotFound(id.to_string()))
    }

    /// Iterates charge sets in stable id order
    pub fn sets(&self) -> impl Iterator<Item = &ChargeSet> {
        self.sets.values()
    }

    /// Returns true if at least one active charge set exists
    pub fn has_active_set(&self) -> bool {
        self.sets.values().any(|s| s.is_active)
    }

    /// Sets the weight of an owner's partition inside a set
    pub fn set_partition_weight(
        &mut self,
        set_id: SetId,
        owner_id: OwnerId,
        weight: Decimal,
    ) -> Result<(), EstateError> {
        let partition = self
            .partitions
            .iter_mut()
            .find(|p| p.set_id == set_id && p.owner_id == owner_id)
            .ok_or_else(|| EstateError::PartitionNotFound {
                owner: owner_id.to_string(),
                set: set_id.to_string(),
            })?;
        partition.weight = weight;
        Ok(())
    }

    /// All partitions of a set
    pub fn partitions_of_set(&self, set_id: SetId) -> Vec<&Partition> {
        self.partitions
            .iter()
            .filter(|p| p.set_id == set_id)
            .collect()
    }

    /// Total partition weight of a set
    pub fn total_weight(&self, set_id: SetId) -> Decimal {
        self.partitions
            .iter()
            .filter(|p| p.set_id == set_id)
            .map(|p| p.weight)
            .sum()
    }

    /// One owner's percentage of a set, 0..100
    ///
    /// Deterministic and side-effect-free; a near-zero set total degrades to
    /// a defined zero instead of a division error.
    pub fn ratio(&self, owner_id: OwnerId, set_id: SetId) -> Result<Decimal, EstateError> {
        let total = self.total_weight(set_id);
        let partition = self
            .partitions
            .iter()
            .find(|p| p.set_id == set_id && p.owner_id == owner_id)
            .ok_or_else(|| EstateError::PartitionNotFound {
                owner: owner_id.to_string(),
                set: set_id.to_string(),
            })?;
        Ok(percentage(partition.weight, total))
    }

    /// The set's partitions as apportionment shares keyed by owner id
    pub fn shares_of_set(&self, set_id: SetId) -> Vec<Share> {
        self.partitions
            .iter()
            .filter(|p| p.set_id == set_id)
            .map(|p| Share::new(p.owner_id, p.weight))
            .collect()
    }

    /// All owners as apportionment shares weighted by their lot shares
    pub fn owner_lot_shares(&self) -> Vec<Share> {
        self.owners
            .values()
            .map(|o| Share::new(o.id, o.lot_shares()))
            .collect()
    }

    /// Sum of all property-lot weights across all owners
    pub fn total_lot_shares(&self) -> Decimal {
        self.owners.values().map(|o| o.lot_shares()).sum()
    }

    /// Removes an owner and their partitions
    ///
    /// The caller is responsible for refusing removal when the owner has
    /// financial history in the ledger.
    pub fn remove_owner(&mut self, id: OwnerId) -> Result<Owner, EstateError> {
        let owner = self
            .owners
            .remove(&id)
            .ok_or_else(|| EstateError::OwnerNotFound(id.to_string()))?;
        self.partitions.retain(|p| p.owner_id != id);
        Ok(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::LoadKind;
    use core_kernel::{Currency, Money};
    use rust_decimal_macros::dec;

    fn set(name: &str) -> ChargeSet {
        ChargeSet::new(
            name,
            Money::new(dec!(1000), Currency::EUR),
            "701",
            LoadKind::Current,
        )
    }

    #[test]
    fn test_sync_creates_one_partition_per_pair() {
        let mut roster = EstateRoster::new();
        roster.add_owner(Owner::new("Dupont")).unwrap();
        roster.add_owner(Owner::new("Martin")).unwrap();
        let set_id = roster.add_set(set("General"));

        assert_eq!(roster.partitions_of_set(set_id).len(), 2);
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut roster = EstateRoster::new();
        roster.add_owner(Owner::new("Dupont")).unwrap();
        roster.add_set(set("General"));

        assert_eq!(roster.sync_partitions(), 0);
    }

    #[test]
    fn test_sync_covers_owners_added_after_sets() {
        let mut roster = EstateRoster::new();
        let set_id = roster.add_set(set("General"));
        roster.add_owner(Owner::new("Dupont")).unwrap();

        assert_eq!(roster.partitions_of_set(set_id).len(), 1);
    }

    #[test]
    fn test_ratio_sums_to_hundred() {
        let mut roster = EstateRoster::new();
        let a = roster.add_owner(Owner::new("A")).unwrap();
        let b = roster.add_owner(Owner::new("B")).unwrap();
        let c = roster.add_owner(Owner::new("C")).unwrap();
        let set_id = roster.add_set(set("General"));

        roster.set_partition_weight(set_id, a, dec!(45)).unwrap();
        roster.set_partition_weight(set_id, b, dec!(35)).unwrap();
        roster.set_partition_weight(set_id, c, dec!(20)).unwrap();

        let sum = roster.ratio(a, set_id).unwrap()
            + roster.ratio(b, set_id).unwrap()
            + roster.ratio(c, set_id).unwrap();
        assert_eq!(sum, dec!(100));
    }

    #[test]
    fn test_ratio_zero_total_is_zero() {
        let mut roster = EstateRoster::new();
        let a = roster.add_owner(Owner::new("A")).unwrap();
        let set_id = roster.add_set(set("General"));

        assert_eq!(roster.ratio(a, set_id).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_remove_owner_drops_partitions() {
        let mut roster = EstateRoster::new();
        let a = roster.add_owner(Owner::new("A")).unwrap();
        let set_id = roster.add_set(set("General"));

        roster.remove_owner(a).unwrap();
        assert!(roster.partitions_of_set(set_id).is_empty());
    }
}
