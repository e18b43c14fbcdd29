//! Calls of funds and their detail lines

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{CallDetailId, CallFundsId, Currency, EntryId, Money, OwnerId, SetId};

use crate::error::FundingError;
use crate::status::DocumentStatus;

/// A call of funds
///
/// In the `Building` state the call is shared and undifferentiated: no owner
/// is assigned and no sequence number allocated. Validation fans it out into
/// one `Valid` call per owner, all sharing the same `num`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallFunds {
    /// Unique identifier
    pub id: CallFundsId,
    /// Shared sequence number, allocated at validation
    pub num: Option<u32>,
    /// Call date
    pub date: NaiveDate,
    /// Free-form comment printed on the call
    pub comment: String,
    /// Workflow state
    pub status: DocumentStatus,
    /// The billed owner; `None` while `Building`
    pub owner: Option<OwnerId>,
    /// Detail lines, one per charge set
    pub details: Vec<CallDetail>,
    /// Ledger entries generated at validation
    pub entry_ids: Vec<EntryId>,
}

impl CallFunds {
    /// Creates a shared draft call
    pub fn draft(date: NaiveDate, comment: impl Into<String>) -> Self {
        Self {
            id: CallFundsId::new_v7(),
            num: None,
            date,
            comment: comment.into(),
            status: DocumentStatus::Building,
            owner: None,
            details: Vec::new(),
            entry_ids: Vec::new(),
        }
    }

    /// Creates an empty finalized call for one owner
    pub(crate) fn finalized(owner: OwnerId, num: u32, date: NaiveDate, comment: &str) -> Self {
        Self {
            id: CallFundsId::new_v7(),
            num: Some(num),
            date,
            comment: comment.to_string(),
            status: DocumentStatus::Valid,
            owner: Some(owner),
            details: Vec::new(),
            entry_ids: Vec::new(),
        }
    }

    /// Adds a detail line; only permitted while drafting
    pub fn add_detail(&mut self, detail: CallDetail) -> Result<CallDetailId, FundingError> {
        if !self.status.is_editable() {
            return Err(FundingError::workflow("edit", self.status));
        }
        let id = detail.id;
        self.details.push(detail);
        Ok(id)
    }

    /// Removes a detail line; only permitted while drafting
    pub fn remove_detail(&mut self, detail_id: CallDetailId) -> Result<(), FundingError> {
        if !self.status.is_editable() {
            return Err(FundingError::workflow("edit", self.status));
        }
        let before = self.details.len();
        self.details.retain(|d| d.id != detail_id);
        if self.details.len() == before {
            return Err(FundingError::DetailNotFound(detail_id.to_string()));
        }
        Ok(())
    }

    /// Sum of the detail prices
    pub fn total(&self) -> Money {
        let currency = self
            .details
            .first()
            .map(|d| d.price.currency())
            .unwrap_or(Currency::EUR);
        self.details
            .iter()
            .fold(Money::zero(currency), |acc, d| acc + d.price)
    }
}

/// One line of a call of funds: a price against a charge set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallDetail {
    /// Unique identifier
    pub id: CallDetailId,
    /// The charge set this line belongs to
    pub set_id: SetId,
    /// Line designation
    pub designation: String,
    /// Billed amount
    pub price: Money,
}

impl CallDetail {
    /// Creates a detail line
    pub fn new(set_id: SetId, designation: impl Into<String>, price: Money) -> Self {
        Self {
            id: CallDetailId::new_v7(),
            set_id,
            designation: designation.into(),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eur(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::EUR)
    }

    fn draft() -> CallFunds {
        CallFunds::draft(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "First quarter",
        )
    }

    #[test]
    fn test_draft_has_no_owner_and_no_num() {
        let call = draft();
        assert_eq!(call.status, DocumentStatus::Building);
        assert!(call.owner.is_none());
        assert!(call.num.is_none());
    }

    #[test]
    fn test_total_sums_details() {
        let mut call = draft();
        call.add_detail(CallDetail::new(SetId::new(), "General", eur(dec!(250))))
            .unwrap();
        call.add_detail(CallDetail::new(SetId::new(), "Elevator", eur(dec!(25))))
            .unwrap();
        assert_eq!(call.total().amount(), dec!(275));
    }

    #[test]
    fn test_edit_refused_once_valid() {
        let mut call = draft();
        call.status = DocumentStatus::Valid;
        let result = call.add_detail(CallDetail::new(SetId::new(), "Late", eur(dec!(10))));
        assert!(matches!(
            result,
            Err(FundingError::WorkflowViolation { action: "edit", .. })
        ));
    }

    #[test]
    fn test_remove_unknown_detail() {
        let mut call = draft();
        let result = call.remove_detail(CallDetailId::new());
        assert!(matches!(result, Err(FundingError::DetailNotFound(_))));
    }
}
