//! Fiscal-year result ventilation
//!
//! At year end the period result (revenue minus expense, both derived from
//! the ledger by account class) is spread back: either one line per owner
//! proportional to their property-lot shares, or a single line on a
//! destination account. The reserve account always carries the balancing
//! counter-line, and the closing entry is locked immediately after posting.

use rust_decimal::Decimal;
use tracing::info;

use core_kernel::{apportion, EntryId, Money, ParameterStore};
use domain_estate::EstateRoster;
use domain_ledger::{Entry, EntryLine, FiscalYear, Journal, Ledger, BALANCE_EPSILON};

use crate::error::AccountingError;
use crate::jurisdiction::{PARAM_OWNER_ACCOUNT, PARAM_RESERVE_ACCOUNT};

/// Where the fiscal-year result goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VentilationTarget {
    /// One line per owner, weighted by property-lot shares
    PerOwner,
    /// A single line on the given account (e.g. working capital)
    Account(String),
}

/// Posts the closing entry that spreads the period result
///
/// Degenerate periods produce no entry at all: a result within the balance
/// tolerance, or a condominium whose total lot shares are not positive,
/// returns `Ok(None)` and leaves the ledger untouched.
pub(crate) fn ventilate(
    fiscal_year: &FiscalYear,
    target: &VentilationTarget,
    roster: &EstateRoster,
    params: &dyn ParameterStore,
    ledger: &mut Ledger,
) -> Result<Option<EntryId>, AccountingError> {
    let result = fiscal_year.result(ledger);
    if result.amount().abs() <= BALANCE_EPSILON {
        return Ok(None);
    }
    if roster.total_lot_shares() <= Decimal::ZERO {
        return Ok(None);
    }

    let reserve_account = params.get_value(PARAM_RESERVE_ACCOUNT)?;

    let mut entry = Entry::new(
        fiscal_year.end,
        Journal::Closing,
        format!("Result ventilation {} - {}", fiscal_year.begin, fiscal_year.end),
    );

    let mut posted = Money::zero(ledger.currency());
    match target {
        VentilationTarget::PerOwner => {
            let owner_account = params.get_value(PARAM_OWNER_ACCOUNT)?;
            for allocation in apportion(result, &roster.owner_lot_shares()) {
                let owner = roster.owner(allocation.id.into())?;
                // A positive result reduces what each owner still owes
                entry = entry.line(
                    EntryLine::new(owner_account.clone(), -allocation.amount)
                        .with_third_party(owner.third_party)
                        .with_designation(owner.name.clone()),
                );
                posted = posted.checked_sub(&allocation.amount)?;
            }
        }
        VentilationTarget::Account(code) => {
            entry = entry.line(EntryLine::new(code.clone(), result));
            posted = posted.checked_add(&result)?;
        }
    }

    // The reserve balances whatever the target side posted
    entry = entry.line(EntryLine::new(reserve_account, -posted));

    let entry_id = ledger.post(entry)?;
    ledger.close_entry(entry_id)?;
    info!(
        fiscal_year = %fiscal_year.id,
        result = %result,
        entry = %entry_id,
        "fiscal-year result ventilated"
    );
    Ok(Some(entry_id))
}
