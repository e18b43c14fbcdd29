//! The ledger aggregate
//!
//! Accepts balanced entries, keeps the chart of accounts, and answers the
//! period-total queries the ventilation engine needs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use core_kernel::{Currency, EntryId, Money, ThirdPartyId};

use crate::account::LedgerAccount;
use crate::entry::Entry;
use crate::error::LedgerError;

/// The double-entry ledger
///
/// # Invariants
///
/// - Every stored entry is balanced (debits == credits within tolerance)
/// - Every line posts to an account present in the chart of accounts
/// - Closed entries are never mutated
#[derive(Debug)]
pub struct Ledger {
    /// Chart of accounts keyed by account code
    accounts: BTreeMap<String, LedgerAccount>,
    /// Posted entries
    entries: BTreeMap<EntryId, Entry>,
    /// Ledger currency
    currency: Currency,
}

impl Ledger {
    /// Creates an empty ledger in the given currency
    pub fn new(currency: Currency) -> Self {
        Self {
            accounts: BTreeMap::new(),
            entries: BTreeMap::new(),
            currency,
        }
    }

    /// Returns the ledger currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Adds an account to the chart of accounts
    ///
    /// # Errors
    ///
    /// Returns an error if an account with this code already exists
    pub fn add_account(&mut self, account: LedgerAccount) -> Result<(), LedgerError> {
        if self.accounts.contains_key(&account.code) {
            return Err(LedgerError::AccountAlreadyExists(account.code));
        }
        self.accounts.insert(account.code.clone(), account);
        Ok(())
    }

    /// Adds an account if its code is not yet present
    pub fn ensure_account(&mut self, account: LedgerAccount) {
        self.accounts.entry(account.code.clone()).or_insert(account);
    }

    /// Returns an account by code
    pub fn account(&self, code: &str) -> Option<&LedgerAccount> {
        self.accounts.get(code)
    }

    /// Verifies an entry could be posted, without storing it
    ///
    /// Runs the serial-control check and verifies every line's account
    /// exists. An unbalanced entry is an internal-consistency failure: the
    /// apportionment math produced corrupt postings.
    pub fn check(&self, entry: &Entry) -> Result<(), LedgerError> {
        for line in &entry.lines {
            if !self.accounts.contains_key(&line.account_code) {
                return Err(LedgerError::AccountNotFound(line.account_code.clone()));
            }
        }

        let control = entry.serial_control();
        if !control.balanced {
            return Err(LedgerError::UnbalancedEntry {
                debits: control.debit.amount(),
                credits: control.credit.amount(),
            });
        }
        Ok(())
    }

    /// Posts an entry
    ///
    /// Runs [`Ledger::check`] first; a failing entry is not stored.
    pub fn post(&mut self, entry: Entry) -> Result<EntryId, LedgerError> {
        self.check(&entry)?;

        let entry_id = entry.id;
        info!(
            entry = %entry_id,
            debit = %entry.serial_control().debit,
            lines = entry.lines.len(),
            "entry posted"
        );
        self.entries.insert(entry_id, entry);
        Ok(entry_id)
    }

    /// Posts a batch of entries, all or nothing
    ///
    /// Every entry is checked before any is stored, so a failure leaves the
    /// ledger exactly as it was. Returns the entry ids in batch order.
    pub fn post_all(&mut self, entries: Vec<Entry>) -> Result<Vec<EntryId>, LedgerError> {
        for entry in &entries {
            self.check(entry)?;
        }
        entries.into_iter().map(|entry| self.post(entry)).collect()
    }

    /// Returns an entry by id
    pub fn entry(&self, id: EntryId) -> Result<&Entry, LedgerError> {
        self.entries
            .get(&id)
            .ok_or_else(|| LedgerError::EntryNotFound(id.to_string()))
    }

    /// Iterates entries in stable id order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Locks an entry against further mutation
    pub fn close_entry(&mut self, id: EntryId) -> Result<(), LedgerError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| LedgerError::EntryNotFound(id.to_string()))?;
        entry.close();
        Ok(())
    }

    /// Returns true if any entry line references this third party
    ///
    /// Used to refuse deleting owners or suppliers with financial history.
    pub fn third_party_has_entries(&self, third_party: ThirdPartyId) -> bool {
        self.entries
            .values()
            .any(|e| e.lines.iter().any(|l| l.third_party == Some(third_party)))
    }

    /// Total revenue posted between two dates (inclusive)
    ///
    /// Revenue lives on class-7 accounts; credits carry negative signed
    /// amounts, so revenue is the negated sum.
    pub fn revenue_between(&self, begin: NaiveDate, end: NaiveDate) -> Money {
        -self.sum_class_between('7', begin, end)
    }

    /// Total expense posted between two dates (inclusive)
    pub fn expense_between(&self, begin: NaiveDate, end: NaiveDate) -> Money {
        self.sum_class_between('6', begin, end)
    }

    fn sum_class_between(&self, class: char, begin: NaiveDate, end: NaiveDate) -> Money {
        self.entries
            .values()
            .filter(|e| e.date >= begin && e.date <= end)
            .flat_map(|e| e.lines.iter())
            .filter(|l| l.account_code.starts_with(class))
            .fold(Money::zero(self.currency), |acc, l| acc + l.amount)
    }
}
