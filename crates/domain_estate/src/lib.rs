//! Estate Domain - Condominium Master Data
//!
//! This crate holds the long-lived master data of a condominium:
//!
//! - **Owner**: a co-owner with contact details and property lots
//! - **PropertyLot**: a lot with its share weight of the general property
//! - **ChargeSet**: a class of charges with budget, revenue account, and
//!   optional cost center
//! - **Partition**: the (owner, set) share weight used to apportion calls
//!   of funds and expenses
//!
//! The [`EstateRoster`] aggregate owns all four and maintains the invariant
//! that exactly one partition exists per (owner, set) pair, through the
//! explicit [`EstateRoster::sync_partitions`] operation.

pub mod error;
pub mod owner;
pub mod partition;
pub mod roster;
pub mod set;

pub use error::EstateError;
pub use owner::{Owner, PropertyLot};
pub use partition::Partition;
pub use roster::EstateRoster;
pub use set::{ChargeSet, LoadKind};
