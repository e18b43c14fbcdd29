//! Core Kernel - Foundational types and utilities for the condominium system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - The shared weighted-apportionment utility with remainder correction
//! - Common identifiers and value objects
//! - The parameter store collaborator for jurisdiction account codes

pub mod apportion;
pub mod error;
pub mod identifiers;
pub mod money;
pub mod params;

pub use apportion::{apportion, Allocation, Share, RESIDUE_EPSILON, WEIGHT_EPSILON};
pub use error::CoreError;
pub use identifiers::{
    CallDetailId, CallFundsId, EntryId, EntryLineId, ExpenseDetailId, ExpenseId, FiscalYearId,
    LotId, OwnerId, PartitionId, SetId, ThirdPartyId,
};
pub use money::{Currency, Money, MoneyError};
pub use params::{InMemoryParameterStore, ParameterStore};
