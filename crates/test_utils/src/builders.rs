//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant fields
//! while using defaults for everything else.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, OwnerId, SetId};
use domain_estate::{ChargeSet, EstateRoster, LoadKind, Owner, PropertyLot};

/// A fully wired roster together with the ids tests need to reference
pub struct TestRoster {
    pub roster: EstateRoster,
    pub owners: Vec<OwnerId>,
    pub sets: Vec<SetId>,
}

/// Builder for constructing an [`EstateRoster`] in tests
///
/// Owners and sets are declared first; partition weights are given per set
/// in owner declaration order.
pub struct TestRosterBuilder {
    owners: Vec<(String, Decimal)>,
    sets: Vec<(String, String, LoadKind, Vec<Decimal>)>,
}

impl Default for TestRosterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRosterBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self {
            owners: Vec::new(),
            sets: Vec::new(),
        }
    }

    /// Declares an owner with one property lot of the given shares
    pub fn with_owner(mut self, name: impl Into<String>, lot_shares: Decimal) -> Self {
        self.owners.push((name.into(), lot_shares));
        self
    }

    /// Declares a charge set with partition weights in owner order
    pub fn with_set(
        mut self,
        name: impl Into<String>,
        revenue_code: impl Into<String>,
        kind: LoadKind,
        weights: Vec<Decimal>,
    ) -> Self {
        self.sets
            .push((name.into(), revenue_code.into(), kind, weights));
        self
    }

    /// Builds the roster
    pub fn build(self) -> TestRoster {
        let mut roster = EstateRoster::new();
        let mut owner_ids = Vec::with_capacity(self.owners.len());
        for (num, (name, lot_shares)) in self.owners.into_iter().enumerate() {
            let mut owner = Owner::new(name);
            owner.add_lot(PropertyLot::new(num as u32 + 1, lot_shares));
            let id = roster.add_owner(owner).expect("builder owner is valid");
            owner_ids.push(id);
        }

        let mut set_ids = Vec::with_capacity(self.sets.len());
        for (name, revenue_code, kind, weights) in self.sets {
            let budget = Money::new(dec!(1000), Currency::EUR);
            let set_id = roster.add_set(ChargeSet::new(name, budget, revenue_code, kind));
            for (owner_id, weight) in owner_ids.iter().zip(weights) {
                roster
                    .set_partition_weight(set_id, *owner_id, weight)
                    .expect("partition exists after sync");
            }
            set_ids.push(set_id);
        }

        TestRoster {
            roster,
            owners: owner_ids,
            sets: set_ids,
        }
    }
}

/// The reference condominium: three owners holding 450/350/200 lot shares,
/// a general set partitioned 45/35/20 and an elevator set partitioned
/// 75/0/25 (the second owner lives on the ground floor)
pub fn standard_roster() -> TestRoster {
    TestRosterBuilder::new()
        .with_owner("Dupont", dec!(450))
        .with_owner("Martin", dec!(350))
        .with_owner("Durand", dec!(200))
        .with_set(
            "General",
            "701",
            LoadKind::Current,
            vec![dec!(45), dec!(35), dec!(20)],
        )
        .with_set(
            "Elevator",
            "701",
            LoadKind::Current,
            vec![dec!(75), dec!(0), dec!(25)],
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_roster_wiring() {
        let fixture = standard_roster();
        assert_eq!(fixture.owners.len(), 3);
        assert_eq!(fixture.sets.len(), 2);
        assert_eq!(fixture.roster.total_lot_shares(), dec!(1000));
        assert_eq!(fixture.roster.total_weight(fixture.sets[0]), dec!(100));
    }

    #[test]
    fn test_standard_roster_ratios() {
        let fixture = standard_roster();
        let ratio = fixture
            .roster
            .ratio(fixture.owners[0], fixture.sets[1])
            .unwrap();
        assert_eq!(ratio, dec!(75));
    }
}
