//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the condominium
//! system. These fixtures are designed to be consistent and predictable for
//! unit tests.

use chrono::NaiveDate;
use core_kernel::{Currency, Money, ThirdPartyId};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Creates a standard EUR amount for testing
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }

    /// The quarterly budget amount used by the standard call fixture
    pub fn eur_250() -> Money {
        Money::new(dec!(250.00), Currency::EUR)
    }

    /// The elevator maintenance amount used by the standard call fixture
    pub fn eur_25() -> Money {
        Money::new(dec!(25.00), Currency::EUR)
    }

    /// Creates a zero amount
    pub fn eur_zero() -> Money {
        Money::zero(Currency::EUR)
    }

    /// Creates a negative amount for credit-note scenarios
    pub fn eur_refund() -> Money {
        Money::new(dec!(-50.00), Currency::EUR)
    }

    /// Creates a USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// First day of the standard fiscal year (Jan 1, 2024)
    pub fn fiscal_year_begin() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
    }

    /// Last day of the standard fiscal year (Dec 31, 2024)
    pub fn fiscal_year_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date")
    }

    /// Standard call-of-funds date (Jan 15, 2024)
    pub fn call_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date")
    }

    /// Standard expense date (Apr 2, 2024)
    pub fn expense_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).expect("valid date")
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// A fresh supplier third-party reference
    pub fn supplier() -> ThirdPartyId {
        ThirdPartyId::new_v7()
    }
}
