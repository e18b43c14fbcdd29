//! The call-of-funds book and splitter
//!
//! [`CallFundsBook`] owns all call-of-funds documents and implements the
//! fan-out that turns a shared draft into one finalized call per owner.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use core_kernel::apportion::{apportion, RESIDUE_EPSILON};
use core_kernel::{CallDetailId, CallFundsId, EntryId, Money, OwnerId, SetId};
use domain_estate::EstateRoster;

use crate::callfunds::{CallDetail, CallFunds};
use crate::error::FundingError;
use crate::status::DocumentStatus;

/// Aggregate owning every call of funds
#[derive(Debug, Default)]
pub struct CallFundsBook {
    calls: BTreeMap<CallFundsId, CallFunds>,
}

impl CallFundsBook {
    /// Creates an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shared draft call and returns its id
    pub fn create_draft(&mut self, date: NaiveDate, comment: impl Into<String>) -> CallFundsId {
        let call = CallFunds::draft(date, comment);
        let id = call.id;
        self.calls.insert(id, call);
        id
    }

    /// Returns a call by id
    pub fn get(&self, id: CallFundsId) -> Result<&CallFunds, FundingError> {
        self.calls
            .get(&id)
            .ok_or_else(|| FundingError::CallNotFound(id.to_string()))
    }

    /// Iterates calls in stable id order
    pub fn calls(&self) -> impl Iterator<Item = &CallFunds> {
        self.calls.values()
    }

    /// Adds a detail line to a draft call
    pub fn add_detail(
        &mut self,
        call_id: CallFundsId,
        set_id: SetId,
        designation: impl Into<String>,
        price: Money,
    ) -> Result<CallDetailId, FundingError> {
        let call = self
            .calls
            .get_mut(&call_id)
            .ok_or_else(|| FundingError::CallNotFound(call_id.to_string()))?;
        call.add_detail(CallDetail::new(set_id, designation, price))
    }

    /// Fans a draft out into one finalized call per owner, without committing
    ///
    /// Each draft detail of amount `A` over set `S` is apportioned across
    /// `S`'s partitions; the per-owner detail prices sum to `A` exactly.
    /// Owners whose resulting call total is negligible get no call at all.
    /// The book is not modified: callers first generate the calls' ledger
    /// entries, and only commit the fan-out once every entry is accepted.
    /// Only reachable from the `Building` state, which is what guarantees
    /// the fan-out happens exactly once.
    pub fn fan_out(
        &self,
        draft_id: CallFundsId,
        roster: &EstateRoster,
    ) -> Result<Vec<CallFunds>, FundingError> {
        let draft = self.get(draft_id)?;
        if draft.status != DocumentStatus::Building {
            return Err(FundingError::workflow("validate", draft.status));
        }

        let new_num = self
            .calls
            .values()
            .filter(|c| c.status != DocumentStatus::Building)
            .filter_map(|c| c.num)
            .max()
            .unwrap_or(0)
            + 1;

        let mut per_owner: BTreeMap<OwnerId, CallFunds> = roster
            .owners()
            .map(|o| {
                (
                    o.id,
                    CallFunds::finalized(o.id, new_num, draft.date, &draft.comment),
                )
            })
            .collect();

        for detail in &draft.details {
            // Unknown sets are stale references left by master-data edits
            roster.set(detail.set_id)?;
            let shares = roster.shares_of_set(detail.set_id);
            for allocation in apportion(detail.price, &shares) {
                let owner_id = OwnerId::from_uuid(allocation.id);
                if let Some(call) = per_owner.get_mut(&owner_id) {
                    call.details.push(CallDetail::new(
                        detail.set_id,
                        detail.designation.clone(),
                        allocation.amount,
                    ));
                }
            }
        }

        Ok(per_owner
            .into_values()
            .filter(|call| call.total().amount().abs() >= RESIDUE_EPSILON)
            .collect())
    }

    /// Commits a fan-out: deletes the draft and stores the finalized calls
    ///
    /// The calls must come from [`CallFundsBook::fan_out`] on the same draft,
    /// with their ledger entry ids already attached.
    pub fn commit_validation(
        &mut self,
        draft_id: CallFundsId,
        calls: Vec<CallFunds>,
    ) -> Vec<CallFundsId> {
        self.calls.remove(&draft_id);
        let num = calls.first().and_then(|c| c.num).unwrap_or(0);
        let created: Vec<CallFundsId> = calls
            .into_iter()
            .map(|call| {
                let id = call.id;
                self.calls.insert(id, call);
                id
            })
            .collect();

        info!(
            draft = %draft_id,
            num = num,
            owners = created.len(),
            "call of funds validated"
        );
        created
    }

    /// Validates a draft: fans it out and commits in one step
    ///
    /// Used when no ledger entries need to be generated between the fan-out
    /// and the commit.
    pub fn validate(
        &mut self,
        draft_id: CallFundsId,
        roster: &EstateRoster,
    ) -> Result<Vec<CallFundsId>, FundingError> {
        let calls = self.fan_out(draft_id, roster)?;
        Ok(self.commit_validation(draft_id, calls))
    }

    /// Closes a validated call: `Valid -> Ended`
    ///
    /// Returns the ids of the entries generated at validation so the caller
    /// can lock them in the ledger.
    pub fn close(&mut self, id: CallFundsId) -> Result<Vec<EntryId>, FundingError> {
        let call = self
            .calls
            .get_mut(&id)
            .ok_or_else(|| FundingError::CallNotFound(id.to_string()))?;
        if call.status != DocumentStatus::Valid {
            return Err(FundingError::workflow("close", call.status));
        }
        call.status = DocumentStatus::Ended;
        Ok(call.entry_ids.clone())
    }

    /// Deletes a call; only drafts may be deleted
    pub fn delete(&mut self, id: CallFundsId) -> Result<(), FundingError> {
        let call = self.get(id)?;
        if call.status != DocumentStatus::Building {
            return Err(FundingError::CannotDelete {
                document: "call of funds",
            });
        }
        self.calls.remove(&id);
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, Money};
    use domain_estate::{ChargeSet, LoadKind, Owner};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn eur(amount: Decimal) -> Money {
        Money::new(amount, Currency::EUR)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    /// Roster with three owners holding 45/35/20 of a "General" set and
    /// 75/0/25 of an "Elevator" set
    fn fixture_roster() -> (EstateRoster, Vec<OwnerId>, SetId, SetId) {
        let mut roster = EstateRoster::new();
        let a = roster.add_owner(Owner::new("Owner A")).unwrap();
        let b = roster.add_owner(Owner::new("Owner B")).unwrap();
        let c = roster.add_owner(Owner::new("Owner C")).unwrap();

        let general = roster.add_set(ChargeSet::new(
            "General",
            eur(dec!(1000)),
            "701",
            LoadKind::Current,
        ));
        let elevator = roster.add_set(ChargeSet::new(
            "Elevator",
            eur(dec!(100)),
            "701",
            LoadKind::Current,
        ));

        roster.set_partition_weight(general, a, dec!(45)).unwrap();
        roster.set_partition_weight(general, b, dec!(35)).unwrap();
        roster.set_partition_weight(general, c, dec!(20)).unwrap();
        roster.set_partition_weight(elevator, a, dec!(75)).unwrap();
        roster.set_partition_weight(elevator, c, dec!(25)).unwrap();

        (roster, vec![a, b, c], general, elevator)
    }

    #[test]
    fn test_split_matches_reference_totals() {
        let (roster, owners, general, elevator) = fixture_roster();
        let mut book = CallFundsBook::new();

        let draft = book.create_draft(date(), "First quarter");
        book.add_detail(draft, general, "General charges", eur(dec!(250.00)))
            .unwrap();
        book.add_detail(draft, elevator, "Elevator upkeep", eur(dec!(25.00)))
            .unwrap();

        let created = book.validate(draft, &roster).unwrap();
        assert_eq!(created.len(), 3);

        let total_of = |owner: OwnerId| {
            book.calls()
                .find(|c| c.owner == Some(owner))
                .map(|c| c.total().amount())
                .unwrap()
        };
        assert_eq!(total_of(owners[0]), dec!(131.25));
        assert_eq!(total_of(owners[1]), dec!(87.50));
        assert_eq!(total_of(owners[2]), dec!(56.25));

        let grand_total: Decimal = book.calls().map(|c| c.total().amount()).sum();
        assert_eq!(grand_total, dec!(275.00));
    }

    #[test]
    fn test_split_is_exact_with_non_terminating_ratios() {
        let mut roster = EstateRoster::new();
        let owners: Vec<OwnerId> = (0..3)
            .map(|i| roster.add_owner(Owner::new(format!("Owner {i}"))).unwrap())
            .collect();
        let set = roster.add_set(ChargeSet::new(
            "General",
            eur(dec!(1000)),
            "701",
            LoadKind::Current,
        ));
        for owner in &owners {
            roster.set_partition_weight(set, *owner, dec!(1)).unwrap();
        }

        let mut book = CallFundsBook::new();
        let draft = book.create_draft(date(), "Thirds");
        book.add_detail(draft, set, "General charges", eur(dec!(100.00)))
            .unwrap();
        book.validate(draft, &roster).unwrap();

        let sum: Decimal = book.calls().map(|c| c.total().amount()).sum();
        assert_eq!(sum, dec!(100.00));
    }

    #[test]
    fn test_zero_share_owner_gets_no_call() {
        let (roster, owners, _, elevator) = fixture_roster();
        let mut book = CallFundsBook::new();

        let draft = book.create_draft(date(), "Elevator only");
        book.add_detail(draft, elevator, "Elevator upkeep", eur(dec!(25.00)))
            .unwrap();

        let created = book.validate(draft, &roster).unwrap();
        // Owner B holds no elevator shares and receives no artifact
        assert_eq!(created.len(), 2);
        assert!(!book.calls().any(|c| c.owner == Some(owners[1])));
    }

    #[test]
    fn test_zero_partition_set_amount_vanishes() {
        // Documented correctness risk: a category with no active partition
        // produces no detail line anywhere
        let mut roster = EstateRoster::new();
        roster.add_owner(Owner::new("Owner A")).unwrap();
        let set = roster.add_set(ChargeSet::new(
            "Orphan",
            eur(dec!(0)),
            "701",
            LoadKind::Current,
        ));

        let mut book = CallFundsBook::new();
        let draft = book.create_draft(date(), "Orphan call");
        book.add_detail(draft, set, "Orphan charges", eur(dec!(50.00)))
            .unwrap();

        let created = book.validate(draft, &roster).unwrap();
        assert!(created.is_empty());
        assert_eq!(book.calls().count(), 0);
    }

    #[test]
    fn test_sequence_number_shared_and_increasing() {
        let (roster, _, general, _) = fixture_roster();
        let mut book = CallFundsBook::new();

        let first = book.create_draft(date(), "Q1");
        book.add_detail(first, general, "General", eur(dec!(100)))
            .unwrap();
        book.validate(first, &roster).unwrap();
        assert!(book.calls().all(|c| c.num == Some(1)));

        let second = book.create_draft(date(), "Q2");
        book.add_detail(second, general, "General", eur(dec!(100)))
            .unwrap();
        let created = book.validate(second, &roster).unwrap();
        for id in created {
            assert_eq!(book.get(id).unwrap().num, Some(2));
        }
    }

    #[test]
    fn test_fan_out_leaves_book_unchanged() {
        let (roster, _, general, _) = fixture_roster();
        let mut book = CallFundsBook::new();

        let draft = book.create_draft(date(), "Q1");
        book.add_detail(draft, general, "General", eur(dec!(100)))
            .unwrap();

        let calls = book.fan_out(draft, &roster).unwrap();
        assert_eq!(calls.len(), 3);

        // The draft is still the only document until the fan-out is committed
        assert_eq!(book.calls().count(), 1);
        assert_eq!(book.get(draft).unwrap().status, DocumentStatus::Building);
    }

    #[test]
    fn test_validate_twice_is_rejected() {
        let (roster, _, general, _) = fixture_roster();
        let mut book = CallFundsBook::new();

        let draft = book.create_draft(date(), "Q1");
        book.add_detail(draft, general, "General", eur(dec!(100)))
            .unwrap();
        book.validate(draft, &roster).unwrap();

        // The draft is deleted by validation; a replayed request conflicts
        let result = book.validate(draft, &roster);
        assert!(matches!(result, Err(FundingError::CallNotFound(_))));
    }

    #[test]
    fn test_delete_finalized_call_is_refused() {
        let (roster, _, general, _) = fixture_roster();
        let mut book = CallFundsBook::new();

        let draft = book.create_draft(date(), "Q1");
        book.add_detail(draft, general, "General", eur(dec!(100)))
            .unwrap();
        let created = book.validate(draft, &roster).unwrap();

        let result = book.delete(created[0]);
        assert!(matches!(result, Err(FundingError::CannotDelete { .. })));
    }

    #[test]
    fn test_delete_draft_is_allowed() {
        let mut book = CallFundsBook::new();
        let draft = book.create_draft(date(), "Q1");
        assert!(book.delete(draft).is_ok());
    }
}
