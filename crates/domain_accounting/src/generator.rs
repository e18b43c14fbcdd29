//! Ledger entry generation for validated funding documents
//!
//! One entry is produced per cost-center group of a document's details, so
//! sets with different cost centers never share an entry. Generators only
//! build entries; the caller checks and posts the whole document's batch in
//! one step, so a failure anywhere leaves the ledger untouched.

use std::collections::BTreeMap;

use core_kernel::{apportion, Money, ParameterStore};
use domain_estate::{EstateRoster, LoadKind};
use domain_funding::{CallDetail, CallFunds, Expense, ExpenseDetail, ExpenseKind};
use domain_ledger::{Entry, EntryLine, Journal, Ledger};

use crate::error::AccountingError;
use crate::jurisdiction::{PARAM_OWNER_ACCOUNT, PARAM_SUPPLIER_ACCOUNT};

/// Builds the entries for one finalized call of funds
///
/// Per cost-center group: one credit line per revenue account involved and a
/// single debit on the jurisdiction's owner account, carrying the owner's
/// third-party reference.
pub(crate) fn callfunds_entries(
    call: &CallFunds,
    roster: &EstateRoster,
    params: &dyn ParameterStore,
    ledger: &Ledger,
) -> Result<Vec<Entry>, AccountingError> {
    let owner_id = call.owner.ok_or_else(|| {
        AccountingError::Configuration("call of funds has no owner assigned".into())
    })?;
    let owner = roster.owner(owner_id)?;
    let owner_account = params.get_value(PARAM_OWNER_ACCOUNT)?;

    let mut groups: BTreeMap<Option<String>, Vec<&CallDetail>> = BTreeMap::new();
    for detail in &call.details {
        let set = roster.set(detail.set_id)?;
        groups.entry(set.cost_center.clone()).or_default().push(detail);
    }

    let description = format!(
        "Call of funds #{} - {}",
        call.num.unwrap_or(0),
        call.comment
    );

    let mut entries = Vec::with_capacity(groups.len());
    for (cost_center, details) in groups {
        let mut by_account: BTreeMap<String, Money> = BTreeMap::new();
        let mut total = Money::zero(ledger.currency());
        for detail in details {
            let set = roster.set(detail.set_id)?;
            let slot = by_account
                .entry(set.revenue_code.clone())
                .or_insert_with(|| Money::zero(ledger.currency()));
            *slot = slot.checked_add(&detail.price)?;
            total = total.checked_add(&detail.price)?;
        }

        let mut entry = Entry::new(call.date, Journal::Sales, description.clone());
        for (code, amount) in by_account {
            let mut line = EntryLine::credit(code, amount);
            if let Some(cc) = &cost_center {
                line = line.with_cost_center(cc.clone());
            }
            entry = entry.line(line);
        }
        entry = entry.line(
            EntryLine::debit(owner_account.clone(), total)
                .with_third_party(owner.third_party)
                .with_designation(owner.name.clone()),
        );

        entries.push(entry);
    }
    Ok(entries)
}

/// Builds the expense-side entries for a validated expense
///
/// Debits each detail's expense account and credits the supplier account
/// with the group total. An asset of expense flips every sign.
pub(crate) fn expense_entries(
    expense: &Expense,
    roster: &EstateRoster,
    params: &dyn ParameterStore,
    ledger: &Ledger,
) -> Result<Vec<Entry>, AccountingError> {
    let sign = expense.kind.sign();
    let supplier_account = params.get_value(PARAM_SUPPLIER_ACCOUNT)?;

    let mut groups: BTreeMap<Option<String>, Vec<&ExpenseDetail>> = BTreeMap::new();
    for detail in &expense.details {
        let set = roster.set(detail.set_id)?;
        groups.entry(set.cost_center.clone()).or_default().push(detail);
    }

    let description = match expense.kind {
        ExpenseKind::Expense => format!("Expense - {}", expense.comment),
        ExpenseKind::Asset => format!("Asset of expense - {}", expense.comment),
    };

    let mut entries = Vec::with_capacity(groups.len());
    for (cost_center, details) in groups {
        let mut by_account: BTreeMap<String, Money> = BTreeMap::new();
        let mut total = Money::zero(ledger.currency());
        for detail in details {
            let amount = detail.price.multiply(sign);
            let slot = by_account
                .entry(detail.expense_account.clone())
                .or_insert_with(|| Money::zero(ledger.currency()));
            *slot = slot.checked_add(&amount)?;
            total = total.checked_add(&amount)?;
        }

        let mut entry = Entry::new(expense.date, Journal::Purchases, description.clone());
        for (code, amount) in by_account {
            let mut line = EntryLine::new(code, amount);
            if let Some(cc) = &cost_center {
                line = line.with_cost_center(cc.clone());
            }
            entry = entry.line(line);
        }
        entry = entry.line(EntryLine::new(supplier_account.clone(), -total).with_third_party(expense.supplier));

        entries.push(entry);
    }
    Ok(entries)
}

/// Builds the revenue-side entries for a validated expense
///
/// Each detail credits its set's revenue account. The owner side is either a
/// single flat debit on the owner account, or, when `split_exceptional` is
/// set and the set funds exceptional charges, one debit per owner apportioned
/// by partition ratio. A set with no active partitions falls back to the flat
/// posting so the entry stays balanced.
pub(crate) fn expense_revenue_entries(
    expense: &Expense,
    roster: &EstateRoster,
    params: &dyn ParameterStore,
    ledger: &Ledger,
    split_exceptional: bool,
) -> Result<Vec<Entry>, AccountingError> {
    let sign = expense.kind.sign();
    let owner_account = params.get_value(PARAM_OWNER_ACCOUNT)?;

    let mut groups: BTreeMap<Option<String>, Vec<&ExpenseDetail>> = BTreeMap::new();
    for detail in &expense.details {
        let set = roster.set(detail.set_id)?;
        groups.entry(set.cost_center.clone()).or_default().push(detail);
    }

    let description = format!("Charge revenue - {}", expense.comment);

    let mut entries = Vec::with_capacity(groups.len());
    for (cost_center, details) in groups {
        let mut entry = Entry::new(expense.date, Journal::Sales, description.clone());
        let mut flat = Money::zero(ledger.currency());

        for detail in details {
            let set = roster.set(detail.set_id)?;
            let amount = detail.price.multiply(sign);

            let mut revenue = EntryLine::new(set.revenue_code.clone(), -amount);
            if let Some(cc) = &cost_center {
                revenue = revenue.with_cost_center(cc.clone());
            }
            entry = entry.line(revenue);

            if split_exceptional && set.kind == LoadKind::Exceptional {
                let allocations = apportion(amount, &roster.shares_of_set(set.id));
                if allocations.is_empty() {
                    flat = flat.checked_add(&amount)?;
                } else {
                    for allocation in allocations {
                        let owner = roster.owner(allocation.id.into())?;
                        entry = entry.line(
                            EntryLine::new(owner_account.clone(), allocation.amount)
                                .with_third_party(owner.third_party)
                                .with_designation(owner.name.clone()),
                        );
                    }
                }
            } else {
                flat = flat.checked_add(&amount)?;
            }
        }

        if !flat.is_zero() {
            entry = entry.line(EntryLine::new(owner_account.clone(), flat));
        }

        entries.push(entry);
    }
    Ok(entries)
}
