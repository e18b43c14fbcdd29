//! Ledger Domain - Double-Entry Journal
//!
//! This crate implements the double-entry bookkeeping collaborator consumed
//! by the condominium core, ensuring financial integrity for all monetary
//! postings.
//!
//! # Conventions
//!
//! Entry lines carry **signed** amounts: positive is a debit, negative is a
//! credit. Every entry must pass [`Entry::serial_control`] before the ledger
//! accepts it: the debit total must equal the credit total within a 0.001
//! tolerance. Lines additionally carry an optional third-party reference
//! (owner or supplier) and an optional cost-center code, the two dimensions
//! condominium cost accounting is tracked on.
//!
//! # Example
//!
//! ```rust,ignore
//! let entry = Entry::new(date, Journal::Sales, "Call of funds 2024-T1")
//!     .line(EntryLine::debit("450", total).with_third_party(owner))
//!     .line(EntryLine::credit("701", total));
//!
//! ledger.post(entry)?;
//! ```

pub mod account;
pub mod entry;
pub mod error;
pub mod fiscal_year;
pub mod ledger;

pub use account::{AccountKind, LedgerAccount};
pub use entry::{Entry, EntryLine, Journal, SerialControl, BALANCE_EPSILON};
pub use error::LedgerError;
pub use fiscal_year::{FiscalYear, FiscalYearStatus};
pub use ledger::Ledger;
