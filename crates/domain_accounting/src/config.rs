//! Runtime configuration for the accounting core.

use core_kernel::Currency;
use serde::Deserialize;

use crate::error::AccountingError;
use crate::jurisdiction::JurisdictionCode;

/// Settings that select the jurisdiction and the working currency.
///
/// Values can be supplied from the environment with the `CONDO_` prefix,
/// e.g. `CONDO_JURISDICTION=france CONDO_CURRENCY=EUR`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccountingConfig {
    pub jurisdiction: JurisdictionCode,
    pub currency: Currency,
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            jurisdiction: JurisdictionCode::None,
            currency: Currency::EUR,
        }
    }
}

impl AccountingConfig {
    /// Loads the configuration from `CONDO_`-prefixed environment variables,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self, AccountingError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("CONDO"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_jurisdiction() {
        let cfg = AccountingConfig::default();
        assert_eq!(cfg.jurisdiction, JurisdictionCode::None);
        assert_eq!(cfg.currency, Currency::EUR);
    }
}
