//! Application context wiring the domains together
//!
//! [`AppContext`] owns the roster, the document books, the ledger, and the
//! parameter store, and drives the document lifecycles: validation generates
//! ledger entries through the jurisdiction strategy, closing locks them, and
//! year end ventilates the result.

use chrono::NaiveDate;
use tracing::info;

use core_kernel::{
    CallFundsId, EntryId, ExpenseId, InMemoryParameterStore, Money, OwnerId, ParameterStore,
    ThirdPartyId,
};
use domain_estate::{ChargeSet, EstateError, EstateRoster, LoadKind, Owner};
use domain_funding::{
    CallFundsBook, DocumentStatus, ExpenseBook, ExpenseDetail, ExpenseKind, FundingError,
};
use domain_ledger::{FiscalYear, Ledger, LedgerAccount};

use crate::config::AccountingConfig;
use crate::error::AccountingError;
use crate::jurisdiction::{
    rules_for, JurisdictionRules, PARAM_CURRENT_REVENUE_ACCOUNT, PARAM_EXCEPTIONAL_REVENUE_ACCOUNT,
};
use crate::ventilation::VentilationTarget;

/// One running condominium system
pub struct AppContext {
    jurisdiction: Box<dyn JurisdictionRules>,
    /// Parameter store holding the jurisdiction account codes
    pub params: InMemoryParameterStore,
    /// The double-entry ledger
    pub ledger: Ledger,
    /// Master data
    pub roster: EstateRoster,
    /// Calls of funds
    pub calls: CallFundsBook,
    /// Expenses and credit notes
    pub expenses: ExpenseBook,
}

impl AppContext {
    /// Builds a context and runs the jurisdiction's system initialization
    pub fn new(config: &AccountingConfig) -> Result<Self, AccountingError> {
        let jurisdiction = rules_for(config.jurisdiction);
        let mut ctx = Self {
            jurisdiction,
            params: InMemoryParameterStore::new(),
            ledger: Ledger::new(config.currency),
            roster: EstateRoster::new(),
            calls: CallFundsBook::new(),
            expenses: ExpenseBook::new(),
        };
        ctx.jurisdiction
            .initialize_system(&mut ctx.params, &mut ctx.ledger)?;
        info!(
            jurisdiction = %ctx.jurisdiction.code(),
            currency = %config.currency,
            "condominium system initialized"
        );
        Ok(ctx)
    }

    /// Adds an account to the chart if it is not already present
    pub fn register_account(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.ledger
            .ensure_account(LedgerAccount::new(code.into(), name.into()));
    }

    /// Creates a charge set using the jurisdiction's default revenue account
    /// for its load kind
    pub fn create_set(
        &mut self,
        name: impl Into<String>,
        budget: Money,
        kind: LoadKind,
    ) -> Result<core_kernel::SetId, AccountingError> {
        let parameter = match kind {
            LoadKind::Current => PARAM_CURRENT_REVENUE_ACCOUNT,
            LoadKind::Exceptional => PARAM_EXCEPTIONAL_REVENUE_ACCOUNT,
        };
        let revenue_code = self.params.get_value(parameter)?;
        Ok(self
            .roster
            .add_set(ChargeSet::new(name, budget, revenue_code, kind)))
    }

    /// Validates a draft call of funds
    ///
    /// Fans the draft out into one call per owner and generates the ledger
    /// entries for every call before anything is committed: a failure leaves
    /// the draft and the ledger untouched, so the validation can be retried
    /// once the configuration is fixed. Returns the created call ids.
    pub fn validate_call(
        &mut self,
        draft_id: CallFundsId,
    ) -> Result<Vec<CallFundsId>, AccountingError> {
        if !self.roster.has_active_set() {
            return Err(AccountingError::Configuration(
                "no active class of charges defined".into(),
            ));
        }

        let mut staged = Vec::new();
        for call in self.calls.fan_out(draft_id, &self.roster)? {
            let entries = self.jurisdiction.generate_account_callfunds(
                &call,
                &self.roster,
                &self.params,
                &self.ledger,
            )?;
            staged.push((call, entries));
        }
        for (_, entries) in &staged {
            for entry in entries {
                self.ledger.check(entry)?;
            }
        }

        // Every entry passed the checks; posting can no longer fail
        let mut finalized = Vec::with_capacity(staged.len());
        for (mut call, entries) in staged {
            call.entry_ids = self.ledger.post_all(entries)?;
            finalized.push(call);
        }
        Ok(self.calls.commit_validation(draft_id, finalized))
    }

    /// Validates a draft expense
    ///
    /// Builds the expense-side and revenue-side entries, posts them as one
    /// batch, then finalizes the document with the entry ids. A failure posts
    /// nothing and leaves the expense in `Building`, so the validation can be
    /// retried; the `Building -> Valid` transition in the book is what makes
    /// a replayed validation fail instead of posting twice.
    pub fn validate_expense(&mut self, id: ExpenseId) -> Result<(), AccountingError> {
        let expense = self.expenses.get(id)?.clone();
        if expense.status != DocumentStatus::Building {
            return Err(FundingError::workflow("validate", expense.status).into());
        }
        if !self.roster.has_active_set() {
            return Err(AccountingError::Configuration(
                "no active class of charges defined".into(),
            ));
        }

        let mut entries = self.jurisdiction.generate_expense_for_expense(
            &expense,
            &self.roster,
            &self.params,
            &self.ledger,
        )?;
        entries.extend(self.jurisdiction.generate_revenue_for_expense(
            &expense,
            &self.roster,
            &self.params,
            &self.ledger,
        )?);

        let entry_ids = self.ledger.post_all(entries)?;
        self.expenses.finalize(id, entry_ids)?;
        Ok(())
    }

    /// Creates a draft expense
    pub fn create_expense(
        &mut self,
        date: NaiveDate,
        comment: impl Into<String>,
        kind: ExpenseKind,
        supplier: ThirdPartyId,
        details: Vec<ExpenseDetail>,
    ) -> Result<ExpenseId, AccountingError> {
        let id = self.expenses.create_draft(date, comment, kind, supplier);
        for detail in details {
            self.expenses.add_detail(id, detail)?;
        }
        Ok(id)
    }

    /// Closes a validated call of funds and locks its entries
    pub fn close_call(&mut self, id: CallFundsId) -> Result<(), AccountingError> {
        let entry_ids = self.calls.close(id)?;
        for entry_id in entry_ids {
            self.ledger.close_entry(entry_id)?;
        }
        Ok(())
    }

    /// Closes a validated expense and locks its entries
    pub fn close_expense(&mut self, id: ExpenseId) -> Result<(), AccountingError> {
        let entry_ids = self.expenses.close(id)?;
        for entry_id in entry_ids {
            self.ledger.close_entry(entry_id)?;
        }
        Ok(())
    }

    /// Removes an owner, refusing when they have ledger history
    pub fn delete_owner(&mut self, id: OwnerId) -> Result<Owner, AccountingError> {
        let owner = self.roster.owner(id)?;
        if self.ledger.third_party_has_entries(owner.third_party) {
            return Err(EstateError::HasFinancialHistory(owner.name.clone()).into());
        }
        Ok(self.roster.remove_owner(id)?)
    }

    /// Ventilates the fiscal-year result and marks the period finished
    pub fn ventilate(
        &mut self,
        fiscal_year: &mut FiscalYear,
        target: &VentilationTarget,
    ) -> Result<Option<EntryId>, AccountingError> {
        let entry_id = self.jurisdiction.ventilate_result(
            fiscal_year,
            target,
            &self.roster,
            &self.params,
            &mut self.ledger,
        )?;
        fiscal_year.finish();
        Ok(entry_id)
    }
}
