//! Jurisdiction strategies
//!
//! National co-ownership regulations differ in which accounts receive the
//! postings: French syndics debit co-owners on 450 and split exceptional
//! revenue per owner, Belgian associations use 410/700 and post flat. The
//! rest of the system talks to a [`JurisdictionRules`] trait object and never
//! branches on the country itself.
//!
//! Account codes are published into the parameter store by
//! [`JurisdictionRules::initialize_system`]; the generators read them back
//! from there, so a missing parameter surfaces as a configuration error
//! rather than a silent wrong posting.

use serde::Deserialize;
use std::fmt;

use core_kernel::{EntryId, ParameterStore};
use domain_estate::EstateRoster;
use domain_funding::{CallFunds, Expense};
use domain_ledger::{Entry, FiscalYear, Ledger, LedgerAccount};

use crate::error::AccountingError;
use crate::generator;
use crate::ventilation::{self, VentilationTarget};

/// Parameter holding the account owners are debited on
pub const PARAM_OWNER_ACCOUNT: &str = "condominium-default-owner-account";
/// Parameter holding the supplier counter-party account
pub const PARAM_SUPPLIER_ACCOUNT: &str = "condominium-supplier-account";
/// Parameter holding the default revenue account for current charge sets
pub const PARAM_CURRENT_REVENUE_ACCOUNT: &str = "condominium-current-revenue-account";
/// Parameter holding the default revenue account for exceptional charge sets
pub const PARAM_EXCEPTIONAL_REVENUE_ACCOUNT: &str = "condominium-exceptional-revenue-account";
/// Parameter holding the reserve account credited at ventilation
pub const PARAM_RESERVE_ACCOUNT: &str = "condominium-current-reserve-account";
/// Parameter holding the working-capital account
pub const PARAM_WORKING_CAPITAL_ACCOUNT: &str = "condominium-working-capital-account";

/// Which national rule set the system runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JurisdictionCode {
    /// No jurisdiction selected yet; posting operations are refused
    None,
    France,
    Belgium,
}

impl fmt::Display for JurisdictionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JurisdictionCode::None => write!(f, "none"),
            JurisdictionCode::France => write!(f, "france"),
            JurisdictionCode::Belgium => write!(f, "belgium"),
        }
    }
}

/// The account codes a jurisdiction posts to
#[derive(Debug, Clone, Copy)]
pub struct JurisdictionAccounts {
    pub owner: &'static str,
    pub supplier: &'static str,
    pub current_revenue: &'static str,
    pub exceptional_revenue: &'static str,
    pub reserve: &'static str,
    pub working_capital: &'static str,
}

const FRENCH_ACCOUNTS: JurisdictionAccounts = JurisdictionAccounts {
    owner: "450",
    supplier: "401",
    current_revenue: "701",
    exceptional_revenue: "702",
    reserve: "103",
    working_capital: "105",
};

const BELGIAN_ACCOUNTS: JurisdictionAccounts = JurisdictionAccounts {
    owner: "410",
    supplier: "440",
    current_revenue: "700",
    exceptional_revenue: "700",
    reserve: "160",
    working_capital: "160",
};

/// Strategy seam between the documents and the ledger
///
/// Implementations decide which accounts receive postings and whether the
/// revenue side of an expense is ratio-split per owner. The generate methods
/// only build entries; the caller posts a document's whole batch atomically.
pub trait JurisdictionRules {
    /// The code this strategy implements
    fn code(&self) -> JurisdictionCode;

    /// Seeds the parameter store and the chart of accounts
    ///
    /// Idempotent; existing accounts are kept. Ends with a cache clear so
    /// subsequent parameter reads observe the seeded values.
    fn initialize_system(
        &self,
        params: &mut dyn ParameterStore,
        ledger: &mut Ledger,
    ) -> Result<(), AccountingError>;

    /// Builds the ledger entries for one validated call of funds
    fn generate_account_callfunds(
        &self,
        call: &CallFunds,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError>;

    /// Builds the expense-side entries for a validated expense
    fn generate_expense_for_expense(
        &self,
        expense: &Expense,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError>;

    /// Builds the revenue-side entries for a validated expense
    fn generate_revenue_for_expense(
        &self,
        expense: &Expense,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError>;

    /// Spreads the fiscal-year result onto the target and locks the entry
    fn ventilate_result(
        &self,
        fiscal_year: &FiscalYear,
        target: &VentilationTarget,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &mut Ledger,
    ) -> Result<Option<EntryId>, AccountingError>;
}

/// Selects the strategy for a jurisdiction code
pub fn rules_for(code: JurisdictionCode) -> Box<dyn JurisdictionRules> {
    match code {
        JurisdictionCode::None => Box::new(DefaultRules),
        JurisdictionCode::France => Box::new(FrenchRules),
        JurisdictionCode::Belgium => Box::new(BelgianRules),
    }
}

fn seed(
    accounts: &JurisdictionAccounts,
    params: &mut dyn ParameterStore,
    ledger: &mut Ledger,
) -> Result<(), AccountingError> {
    params.change_value(PARAM_OWNER_ACCOUNT, accounts.owner);
    params.change_value(PARAM_SUPPLIER_ACCOUNT, accounts.supplier);
    params.change_value(PARAM_CURRENT_REVENUE_ACCOUNT, accounts.current_revenue);
    params.change_value(PARAM_EXCEPTIONAL_REVENUE_ACCOUNT, accounts.exceptional_revenue);
    params.change_value(PARAM_RESERVE_ACCOUNT, accounts.reserve);
    params.change_value(PARAM_WORKING_CAPITAL_ACCOUNT, accounts.working_capital);
    params.clear();

    ledger.ensure_account(LedgerAccount::new(accounts.owner, "Co-owners"));
    ledger.ensure_account(LedgerAccount::new(accounts.supplier, "Suppliers"));
    ledger.ensure_account(LedgerAccount::new(
        accounts.current_revenue,
        "Current charges revenue",
    ));
    ledger.ensure_account(LedgerAccount::new(
        accounts.exceptional_revenue,
        "Exceptional charges revenue",
    ));
    ledger.ensure_account(LedgerAccount::new(accounts.reserve, "Reserve fund"));
    ledger.ensure_account(LedgerAccount::new(
        accounts.working_capital,
        "Working capital",
    ));
    Ok(())
}

fn not_configured(operation: &str) -> AccountingError {
    AccountingError::Configuration(format!(
        "no jurisdiction selected, cannot {operation}"
    ))
}

/// Placeholder strategy used before a jurisdiction is chosen
///
/// Initialization is a no-op and every posting operation is refused, so a
/// half-configured system cannot write to the ledger.
pub struct DefaultRules;

impl JurisdictionRules for DefaultRules {
    fn code(&self) -> JurisdictionCode {
        JurisdictionCode::None
    }

    fn initialize_system(
        &self,
        _params: &mut dyn ParameterStore,
        _ledger: &mut Ledger,
    ) -> Result<(), AccountingError> {
        Ok(())
    }

    fn generate_account_callfunds(
        &self,
        _call: &CallFunds,
        _roster: &EstateRoster,
        _params: &dyn ParameterStore,
        _ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError> {
        Err(not_configured("post a call of funds"))
    }

    fn generate_expense_for_expense(
        &self,
        _expense: &Expense,
        _roster: &EstateRoster,
        _params: &dyn ParameterStore,
        _ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError> {
        Err(not_configured("post an expense"))
    }

    fn generate_revenue_for_expense(
        &self,
        _expense: &Expense,
        _roster: &EstateRoster,
        _params: &dyn ParameterStore,
        _ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError> {
        Err(not_configured("post expense revenue"))
    }

    fn ventilate_result(
        &self,
        _fiscal_year: &FiscalYear,
        _target: &VentilationTarget,
        _roster: &EstateRoster,
        _params: &dyn ParameterStore,
        _ledger: &mut Ledger,
    ) -> Result<Option<EntryId>, AccountingError> {
        Err(not_configured("ventilate a fiscal year"))
    }
}

/// French syndic rules
///
/// Owners on 450, suppliers on 401, current revenue on 701, exceptional
/// revenue on 702. The revenue side of an expense against an exceptional
/// charge set is split per owner by partition ratio, so each co-owner's
/// 450 sub-balance tracks their share of works.
pub struct FrenchRules;

impl JurisdictionRules for FrenchRules {
    fn code(&self) -> JurisdictionCode {
        JurisdictionCode::France
    }

    fn initialize_system(
        &self,
        params: &mut dyn ParameterStore,
        ledger: &mut Ledger,
    ) -> Result<(), AccountingError> {
        seed(&FRENCH_ACCOUNTS, params, ledger)
    }

    fn generate_account_callfunds(
        &self,
        call: &CallFunds,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError> {
        generator::callfunds_entries(call, roster, params, ledger)
    }

    fn generate_expense_for_expense(
        &self,
        expense: &Expense,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError> {
        generator::expense_entries(expense, roster, params, ledger)
    }

    fn generate_revenue_for_expense(
        &self,
        expense: &Expense,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError> {
        generator::expense_revenue_entries(expense, roster, params, ledger, true)
    }

    fn ventilate_result(
        &self,
        fiscal_year: &FiscalYear,
        target: &VentilationTarget,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &mut Ledger,
    ) -> Result<Option<EntryId>, AccountingError> {
        ventilation::ventilate(fiscal_year, target, roster, params, ledger)
    }
}

/// Belgian association rules
///
/// Owners on 410, suppliers on 440, all charge revenue on 700, reserve fund
/// on 160. Expense revenue is posted flat; owner sub-balances are only
/// maintained through calls of funds.
pub struct BelgianRules;

impl JurisdictionRules for BelgianRules {
    fn code(&self) -> JurisdictionCode {
        JurisdictionCode::Belgium
    }

    fn initialize_system(
        &self,
        params: &mut dyn ParameterStore,
        ledger: &mut Ledger,
    ) -> Result<(), AccountingError> {
        seed(&BELGIAN_ACCOUNTS, params, ledger)
    }

    fn generate_account_callfunds(
        &self,
        call: &CallFunds,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError> {
        generator::callfunds_entries(call, roster, params, ledger)
    }

    fn generate_expense_for_expense(
        &self,
        expense: &Expense,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError> {
        generator::expense_entries(expense, roster, params, ledger)
    }

    fn generate_revenue_for_expense(
        &self,
        expense: &Expense,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &Ledger,
    ) -> Result<Vec<Entry>, AccountingError> {
        generator::expense_revenue_entries(expense, roster, params, ledger, false)
    }

    fn ventilate_result(
        &self,
        fiscal_year: &FiscalYear,
        target: &VentilationTarget,
        roster: &EstateRoster,
        params: &dyn ParameterStore,
        ledger: &mut Ledger,
    ) -> Result<Option<EntryId>, AccountingError> {
        ventilation::ventilate(fiscal_year, target, roster, params, ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, InMemoryParameterStore};

    #[test]
    fn test_french_initialize_seeds_params_and_chart() {
        let mut params = InMemoryParameterStore::new();
        let mut ledger = Ledger::new(Currency::EUR);

        FrenchRules.initialize_system(&mut params, &mut ledger).unwrap();

        assert_eq!(params.get_value(PARAM_OWNER_ACCOUNT).unwrap(), "450");
        assert_eq!(params.get_value(PARAM_RESERVE_ACCOUNT).unwrap(), "103");
        assert!(ledger.account("450").is_some());
        assert!(ledger.account("702").is_some());
    }

    #[test]
    fn test_belgian_initialize_seeds_params_and_chart() {
        let mut params = InMemoryParameterStore::new();
        let mut ledger = Ledger::new(Currency::EUR);

        BelgianRules.initialize_system(&mut params, &mut ledger).unwrap();

        assert_eq!(params.get_value(PARAM_OWNER_ACCOUNT).unwrap(), "410");
        assert_eq!(params.get_value(PARAM_CURRENT_REVENUE_ACCOUNT).unwrap(), "700");
        assert!(ledger.account("160").is_some());
    }

    #[test]
    fn test_default_rules_refuse_posting() {
        let params = InMemoryParameterStore::new();
        let ledger = Ledger::new(Currency::EUR);
        let roster = EstateRoster::new();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let call = CallFunds::draft(date, "T1");

        let result = DefaultRules.generate_account_callfunds(&call, &roster, &params, &ledger);
        assert!(matches!(result, Err(AccountingError::Configuration(_))));
    }

    #[test]
    fn test_jurisdiction_code_deserializes_lowercase() {
        let code: JurisdictionCode = serde_json::from_str("\"france\"").unwrap();
        assert_eq!(code, JurisdictionCode::France);
    }
}
