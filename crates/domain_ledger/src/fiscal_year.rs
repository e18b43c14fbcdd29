//! Fiscal years

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{FiscalYearId, Money};

use crate::ledger::Ledger;

/// Fiscal-year status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiscalYearStatus {
    /// The current accounting period
    Running,
    /// Closed; its result has been ventilated
    Finished,
}

/// An accounting period with its revenue and expense totals derived from
/// the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Unique identifier
    pub id: FiscalYearId,
    /// First day of the period
    pub begin: NaiveDate,
    /// Last day of the period
    pub end: NaiveDate,
    /// Status
    pub status: FiscalYearStatus,
}

impl FiscalYear {
    /// Creates a running fiscal year
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: FiscalYearId::new_v7(),
            begin,
            end,
            status: FiscalYearStatus::Running,
        }
    }

    /// Total revenue posted in this period
    pub fn total_revenue(&self, ledger: &Ledger) -> Money {
        ledger.revenue_between(self.begin, self.end)
    }

    /// Total expense posted in this period
    pub fn total_expense(&self, ledger: &Ledger) -> Money {
        ledger.expense_between(self.begin, self.end)
    }

    /// The period result: revenue minus expense
    pub fn result(&self, ledger: &Ledger) -> Money {
        self.total_revenue(ledger) - self.total_expense(ledger)
    }

    /// Marks the period finished
    pub fn finish(&mut self) {
        self.status = FiscalYearStatus::Finished;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::LedgerAccount;
    use crate::entry::{Entry, EntryLine, Journal};
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_result_from_ledger() {
        let mut ledger = Ledger::new(Currency::EUR);
        ledger.ensure_account(LedgerAccount::new("450", "Co-owners"));
        ledger.ensure_account(LedgerAccount::new("701", "Revenue"));
        ledger.ensure_account(LedgerAccount::new("602", "Maintenance"));

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        ledger
            .post(
                Entry::new(date, Journal::Sales, "Call")
                    .line(EntryLine::debit("450", Money::new(dec!(500), Currency::EUR)))
                    .line(EntryLine::credit("701", Money::new(dec!(500), Currency::EUR))),
            )
            .unwrap();
        ledger
            .post(
                Entry::new(date, Journal::Purchases, "Works")
                    .line(EntryLine::debit("602", Money::new(dec!(180), Currency::EUR)))
                    .line(EntryLine::credit("450", Money::new(dec!(180), Currency::EUR))),
            )
            .unwrap();

        let fy = FiscalYear::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        );
        assert_eq!(fy.result(&ledger).amount(), dec!(320));
    }
}
