//! Expenses, credit notes, and the expense book

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{Currency, EntryId, ExpenseDetailId, ExpenseId, Money, SetId, ThirdPartyId};

use crate::error::FundingError;
use crate::status::DocumentStatus;

/// Whether a document is a normal expense or an asset of expense (credit note)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseKind {
    /// A supplier charge
    Expense,
    /// A credit note; all posting signs are flipped
    Asset,
}

impl ExpenseKind {
    /// Posting sign: `+1` for an expense, `-1` for an asset
    pub fn sign(&self) -> Decimal {
        match self {
            ExpenseKind::Expense => dec!(1),
            ExpenseKind::Asset => dec!(-1),
        }
    }
}

/// A third-party charge against the condominium
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,
    /// Sequence number, allocated at validation
    pub num: Option<u32>,
    /// Document date
    pub date: NaiveDate,
    /// Free-form comment
    pub comment: String,
    /// Workflow state
    pub status: DocumentStatus,
    /// Expense vs credit note
    pub kind: ExpenseKind,
    /// The supplier billed on the counter-party line
    pub supplier: ThirdPartyId,
    /// Detail lines, one per charge set
    pub details: Vec<ExpenseDetail>,
    /// Ledger entries generated at validation
    pub entry_ids: Vec<EntryId>,
}

impl Expense {
    /// Creates a draft expense
    pub fn draft(
        date: NaiveDate,
        comment: impl Into<String>,
        kind: ExpenseKind,
        supplier: ThirdPartyId,
    ) -> Self {
        Self {
            id: ExpenseId::new_v7(),
            num: None,
            date,
            comment: comment.into(),
            status: DocumentStatus::Building,
            kind,
            supplier,
            details: Vec::new(),
            entry_ids: Vec::new(),
        }
    }

    /// Adds a detail line; only permitted while drafting
    pub fn add_detail(&mut self, detail: ExpenseDetail) -> Result<ExpenseDetailId, FundingError> {
        if !self.status.is_editable() {
            return Err(FundingError::workflow("edit", self.status));
        }
        let id = detail.id;
        self.details.push(detail);
        Ok(id)
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

/// One line of an expense: a price against a charge set and expense account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDetail {
    /// Unique identifier
    pub id: ExpenseDetailId,
    /// The charge set this line belongs to
    pub set_id: SetId,
    /// Line designation
    pub designation: String,
    /// Expense account code debited for this line
    pub expense_account: String,
    /// Billed amount
    pub price: Money,
}

impl ExpenseDetail {
    /// Creates a detail line
    pub fn new(
        set_id: SetId,
        designation: impl Into<String>,
        expense_account: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: ExpenseDetailId::new_v7(),
            set_id,
            designation: designation.into(),
            expense_account: expense_account.into(),
            price,
        }
    }
}

/// Aggregate owning every expense document
#[derive(Debug, Default)]
pub struct ExpenseBook {
    expenses: BTreeMap<ExpenseId, Expense>,
}

impl ExpenseBook {
    /// Creates an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a draft expense and returns its id
    pub fn create_draft(
        &mut self,
        date: NaiveDate,
        comment: impl Into<String>,
        kind: ExpenseKind,
        supplier: ThirdPartyId,
    ) -> ExpenseId {
        let expense = Expense::draft(date, comment, kind, supplier);
        let id = expense.id;
        self.expenses.insert(id, expense);
        id
    }

    /// Returns an expense by id
    pub fn get(&self, id: ExpenseId) -> Result<&Expense, FundingError> {
        self.expenses
            .get(&id)
            .ok_or_else(|| FundingError::ExpenseNotFound(id.to_string()))
    }

    /// Iterates expenses in stable id order
    pub fn expenses(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.values()
    }

    /// Adds a detail line to a draft expense
    pub fn add_detail(
        &mut self,
        expense_id: ExpenseId,
        detail: ExpenseDetail,
    ) -> Result<ExpenseDetailId, FundingError> {
        let expense = self
            .expenses
            .get_mut(&expense_id)
            .ok_or_else(|| FundingError::ExpenseNotFound(expense_id.to_string()))?;
        expense.add_detail(detail)
    }

    /// Finalizes a draft: `Building -> Valid`, exactly once
    ///
    /// The transition is conditioned on the current state, so a replayed
    /// validation observes `Valid` and is rejected instead of generating
    /// duplicate postings. The caller passes the ledger entries it generated
    /// for this document.
    pub fn finalize(
        &mut self,
        id: ExpenseId,
        entry_ids: Vec<EntryId>,
    ) -> Result<(), FundingError> {
        let next_num = self
            .expenses
            .values()
            .filter_map(|e| e.num)
            .max()
            .unwrap_or(0)
            + 1;
        let expense = self
            .expenses
            .get_mut(&id)
            .ok_or_else(|| FundingError::ExpenseNotFound(id.to_string()))?;
        if expense.status != DocumentStatus::Building {
            return Err(FundingError::workflow("validate", expense.status));
        }
        expense.status = DocumentStatus::Valid;
        expense.num = Some(next_num);
        expense.entry_ids = entry_ids;
        info!(expense = %id, num = next_num, "expense validated");
        Ok(())
    }

    /// Closes a validated expense: `Valid -> Ended`
    ///
    /// Returns the ids of the entries generated at validation so the caller
    /// can lock them, along with any payment entries.
    pub fn close(&mut self, id: ExpenseId) -> Result<Vec<EntryId>, FundingError> {
        let expense = self
            .expenses
            .get_mut(&id)
            .ok_or_else(|| FundingError::ExpenseNotFound(id.to_string()))?;
        if expense.status != DocumentStatus::Valid {
            return Err(FundingError::workflow("close", expense.status));
        }
        expense.status = DocumentStatus::Ended;
        Ok(expense.entry_ids.clone())
    }

    /// Deletes an expense; only drafts may be deleted
    pub fn delete(&mut self, id: ExpenseId) -> Result<(), FundingError> {
        let expense = self.get(id)?;
        if expense.status != DocumentStatus::Building {
            return Err(FundingError::CannotDelete {
                document: "expense",
            });
        }
        self.expenses.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eur(amount: Decimal) -> Money {
        Money::new(amount, Currency::EUR)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_asset_flips_sign() {
        assert_eq!(ExpenseKind::Expense.sign(), dec!(1));
        assert_eq!(ExpenseKind::Asset.sign(), dec!(-1));
    }

    #[test]
    fn test_finalize_assigns_sequence_number() {
        let mut book = ExpenseBook::new();
        let supplier = ThirdPartyId::new();

        let first = book.create_draft(date(), "Plumber", ExpenseKind::Expense, supplier);
        book.finalize(first, Vec::new()).unwrap();
        assert_eq!(book.get(first).unwrap().num, Some(1));

        let second = book.create_draft(date(), "Gardener", ExpenseKind::Expense, supplier);
        book.finalize(second, Vec::new()).unwrap();
        assert_eq!(book.get(second).unwrap().num, Some(2));
    }

    #[test]
    fn test_finalize_twice_is_rejected() {
        let mut book = ExpenseBook::new();
        let id = book.create_draft(date(), "Plumber", ExpenseKind::Expense, ThirdPartyId::new());

        book.finalize(id, Vec::new()).unwrap();
        let result = book.finalize(id, Vec::new());
        assert!(matches!(
            result,
            Err(FundingError::WorkflowViolation {
                action: "validate",
                ..
            })
        ));
    }

    #[test]
    fn test_delete_validated_expense_is_refused() {
        let mut book = ExpenseBook::new();
        let id = book.create_draft(date(), "Plumber", ExpenseKind::Expense, ThirdPartyId::new());
        book.finalize(id, Vec::new()).unwrap();

        let result = book.delete(id);
        assert!(matches!(result, Err(FundingError::CannotDelete { .. })));
    }

    #[test]
    fn test_close_requires_valid_state() {
        let mut book = ExpenseBook::new();
        let id = book.create_draft(date(), "Plumber", ExpenseKind::Expense, ThirdPartyId::new());

        let result = book.close(id);
        assert!(matches!(
            result,
            Err(FundingError::WorkflowViolation { action: "close", .. })
        ));
    }

    #[test]
    fn test_detail_edit_frozen_after_validation() {
        let mut book = ExpenseBook::new();
        let id = book.create_draft(date(), "Plumber", ExpenseKind::Expense, ThirdPartyId::new());
        book.finalize(id, Vec::new()).unwrap();

        let result = book.add_detail(
            id,
            ExpenseDetail::new(SetId::new(), "Late line", "602", eur(dec!(10))),
        );
        assert!(matches!(
            result,
            Err(FundingError::WorkflowViolation { action: "edit", .. })
        ));
    }
}
