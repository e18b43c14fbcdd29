//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_ledger::Entry;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than
/// tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that an entry passes serial control
///
/// # Panics
///
/// Panics with the debit and credit totals if the entry is unbalanced
pub fn assert_entry_balanced(entry: &Entry) {
    let control = entry.serial_control();
    assert!(
        control.balanced,
        "Entry '{}' is unbalanced: debit={}, credit={}",
        entry.description, control.debit, control.credit
    );
}

/// Asserts that the signed line amounts of an entry sum to the expected value
/// for one account code
///
/// # Panics
///
/// Panics if the sum differs from the expectation
pub fn assert_account_sum(entry: &Entry, account_code: &str, expected: Decimal) {
    let sum: Decimal = entry
        .lines
        .iter()
        .filter(|l| l.account_code == account_code)
        .map(|l| l.amount.amount())
        .sum();
    assert_eq!(
        sum, expected,
        "Account {account_code} lines of entry '{}' sum to {sum}, expected {expected}",
        entry.description
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::Currency;
    use domain_ledger::{EntryLine, Journal};
    use rust_decimal_macros::dec;

    #[test]
    fn test_balanced_entry_passes() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let entry = Entry::new(date, Journal::Sales, "Call")
            .line(EntryLine::debit("450", Money::new(dec!(80), Currency::EUR)))
            .line(EntryLine::credit("701", Money::new(dec!(80), Currency::EUR)));

        assert_entry_balanced(&entry);
        assert_account_sum(&entry, "450", dec!(80));
        assert_account_sum(&entry, "701", dec!(-80));
    }

    #[test]
    #[should_panic(expected = "unbalanced")]
    fn test_unbalanced_entry_panics() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let entry = Entry::new(date, Journal::Sales, "Broken")
            .line(EntryLine::debit("450", Money::new(dec!(80), Currency::EUR)));

        assert_entry_balanced(&entry);
    }
}
