//! Funding Domain - Workflow Documents
//!
//! Calls of funds and expenses are workflow-state documents: created in the
//! `Building` draft state, mutated only while drafting, then irreversibly
//! transitioned to `Valid` (which fans a draft call out into one finalized
//! call per owner, or generates ledger entries for an expense) and finally
//! to `Ended`, which locks the underlying ledger entries.
//!
//! The call-of-funds splitter lives in [`CallFundsBook::validate`]: each
//! draft detail line is apportioned across the set's partitions with the
//! kernel apportionment utility, so the per-owner detail prices always sum
//! to the drafted amount exactly.

pub mod book;
pub mod callfunds;
pub mod error;
pub mod expense;
pub mod status;

pub use book::CallFundsBook;
pub use callfunds::{CallDetail, CallFunds};
pub use error::FundingError;
pub use expense::{Expense, ExpenseBook, ExpenseDetail, ExpenseKind};
pub use status::DocumentStatus;
