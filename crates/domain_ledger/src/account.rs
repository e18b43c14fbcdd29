//! Accounts for the chart of accounts
//!
//! Accounts are keyed by their code (e.g. "701"); the class digit follows
//! the French-style numbering both supported jurisdictions use: 6 expense,
//! 7 revenue, 4 third parties, 1 capital and reserves.

use serde::{Deserialize, Serialize};

/// Kinds of accounts in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Liability accounts (credit normal balance)
    Liability,
    /// Equity and reserve accounts (credit normal balance)
    Equity,
    /// Third-party accounts: owners and suppliers
    ThirdParty,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
}

impl AccountKind {
    /// Returns true if this account kind has a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        matches!(
            self,
            AccountKind::Asset | AccountKind::Expense | AccountKind::ThirdParty
        )
    }

    /// Classifies an account code by its class digit
    pub fn of_code(code: &str) -> AccountKind {
        match code.chars().next() {
            Some('1') => AccountKind::Equity,
            Some('2') | Some('3') | Some('5') => AccountKind::Asset,
            Some('4') => AccountKind::ThirdParty,
            Some('6') => AccountKind::Expense,
            Some('7') => AccountKind::Revenue,
            _ => AccountKind::Liability,
        }
    }
}

/// An account in the chart of accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerAccount {
    /// Account code (e.g. "701")
    pub code: String,
    /// Account name
    pub name: String,
    /// Account kind
    pub kind: AccountKind,
    /// Whether the account accepts new postings
    pub is_active: bool,
}

impl LedgerAccount {
    /// Creates a new account, classifying it from its code
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        let kind = AccountKind::of_code(&code);
        Self {
            code,
            name: name.into(),
            kind,
            is_active: true,
        }
    }

    /// Creates a new account with an explicit kind
    pub fn with_kind(code: impl Into<String>, name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            kind,
            is_active: true,
        }
    }
}
