//! Accounting orchestration for the condominium core.
//!
//! This crate ties the estate roster, the funding documents, and the ledger
//! together. Jurisdiction strategies decide which accounts receive postings,
//! the generator turns validated documents into balanced ledger entries, and
//! the ventilation module spreads a fiscal-year result back onto owners or a
//! reserve account.

pub mod config;
pub mod context;
pub mod error;
pub mod jurisdiction;
pub mod ventilation;

pub(crate) mod generator;

pub use config::AccountingConfig;
pub use context::AppContext;
pub use error::AccountingError;
pub use jurisdiction::{rules_for, JurisdictionCode, JurisdictionRules};
pub use ventilation::VentilationTarget;
