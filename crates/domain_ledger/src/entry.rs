//! Entries and entry lines

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{EntryId, EntryLineId, Money, ThirdPartyId};

use crate::error::LedgerError;

/// Tolerance inside which debit and credit totals are considered equal
pub const BALANCE_EPSILON: Decimal = dec!(0.001);

/// The journal an entry is recorded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Journal {
    /// Supplier invoices and credit notes
    Purchases,
    /// Calls of funds and owner revenue
    Sales,
    /// Owner and supplier payments
    Payments,
    /// Miscellaneous operations
    Various,
    /// Fiscal-year closing operations
    Closing,
}

/// A single line of a ledger entry
///
/// Amounts are signed: positive is a debit, negative is a credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryLine {
    /// Unique line identifier
    pub id: EntryLineId,
    /// Account code this line posts to
    pub account_code: String,
    /// Signed amount (debit > 0, credit < 0)
    pub amount: Money,
    /// Optional third-party reference (owner or supplier)
    pub third_party: Option<ThirdPartyId>,
    /// Optional cost-center code
    pub cost_center: Option<String>,
    /// Optional line designation
    pub designation: Option<String>,
}

impl EntryLine {
    /// Creates a line with a signed amount
    pub fn new(account_code: impl Into<String>, amount: Money) -> Self {
        Self {
            id: EntryLineId::new_v7(),
            account_code: account_code.into(),
            amount,
            third_party: None,
            cost_center: None,
            designation: None,
        }
    }

    /// Creates a debit line from a positive amount
    pub fn debit(account_code: impl Into<String>, amount: Money) -> Self {
        Self::new(account_code, amount)
    }

    /// Creates a credit line from a positive amount
    pub fn credit(account_code: impl Into<String>, amount: Money) -> Self {
        Self::new(account_code, -amount)
    }

    /// Attaches a third-party reference
    pub fn with_third_party(mut self, third_party: ThirdPartyId) -> Self {
        self.third_party = Some(third_party);
        self
    }

    /// Attaches a cost-center code
    pub fn with_cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.cost_center = Some(cost_center.into());
        self
    }

    /// Attaches a designation
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = Some(designation.into());
        self
    }
}

/// Result of the debit/credit balance check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialControl {
    /// Whether debits equal credits within [`BALANCE_EPSILON`]
    pub balanced: bool,
    /// Sum of debit lines
    pub debit: Money,
    /// Sum of credit lines, as a positive magnitude
    pub credit: Money,
}

/// An accounting journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Unique entry identifier
    pub id: EntryId,
    /// Accounting date
    pub date: NaiveDate,
    /// Journal
    pub journal: Journal,
    /// Description
    pub description: String,
    /// Whether the entry is locked against further mutation
    pub closed: bool,
    /// Entry lines
    pub lines: Vec<EntryLine>,
}

impl Entry {
    /// Creates an empty open entry
    pub fn new(date: NaiveDate, journal: Journal, description: impl Into<String>) -> Self {
        Self {
            id: EntryId::new_v7(),
            date,
            journal,
            description: description.into(),
            closed: false,
            lines: Vec::new(),
        }
    }

    /// Adds a line (builder style)
    pub fn line(mut self, line: EntryLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Adds a line to an open entry
    pub fn add_line(&mut self, line: EntryLine) -> Result<(), LedgerError> {
        if self.closed {
            return Err(LedgerError::EntryClosed(self.id.to_string()));
        }
        self.lines.push(line);
        Ok(())
    }

    /// Checks that debit and credit totals match within tolerance
    pub fn serial_control(&self) -> SerialControl {
        let currency = self
            .lines
            .first()
            .map(|l| l.amount.currency())
            .unwrap_or(core_kernel::Currency::EUR);

        let mut debit = Money::zero(currency);
        let mut credit = Money::zero(currency);
        for line in &self.lines {
            if line.amount.is_negative() {
                credit = credit + line.amount.abs();
            } else {
                debit = debit + line.amount;
            }
        }

        let balanced = (debit.amount() - credit.amount()).abs() <= BALANCE_EPSILON;
        SerialControl {
            balanced,
            debit,
            credit,
        }
    }

    /// Locks the entry against further mutation
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Returns true if the entry is locked
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;

    fn eur(amount: Decimal) -> Money {
        Money::new(amount, Currency::EUR)
    }

    #[test]
    fn test_serial_control_balanced() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let entry = Entry::new(date, Journal::Sales, "Call of funds")
            .line(EntryLine::debit("450", eur(dec!(131.25))))
            .line(EntryLine::credit("701", eur(dec!(131.25))));

        let control = entry.serial_control();
        assert!(control.balanced);
        assert_eq!(control.debit.amount(), dec!(131.25));
        assert_eq!(control.credit.amount(), dec!(131.25));
    }

    #[test]
    fn test_serial_control_unbalanced() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let entry = Entry::new(date, Journal::Sales, "Broken")
            .line(EntryLine::debit("450", eur(dec!(100.00))))
            .line(EntryLine::credit("701", eur(dec!(99.99))));

        assert!(!entry.serial_control().balanced);
    }

    #[test]
    fn test_serial_control_within_tolerance() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let entry = Entry::new(date, Journal::Sales, "Rounding dust")
            .line(EntryLine::new("450", eur(dec!(100.0005))))
            .line(EntryLine::new("701", eur(dec!(-100.00))));

        assert!(entry.serial_control().balanced);
    }

    #[test]
    fn test_add_line_to_closed_entry_fails() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut entry = Entry::new(date, Journal::Closing, "Closed");
        entry.close();

        let result = entry.add_line(EntryLine::debit("450", eur(dec!(1))));
        assert!(matches!(result, Err(LedgerError::EntryClosed(_))));
    }
}
