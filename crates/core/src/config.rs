//! Ledger-wide settings shared by the services.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CURRENCY;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerConfig {
    /// Currency given to wallets created without one.
    pub default_currency: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn new(default_currency: impl Into<String>) -> Self {
        Self {
            default_currency: default_currency.into().trim().to_uppercase(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let currency = &self.default_currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidConfigValue(format!(
                "default currency '{}' must be a 3-letter code",
                currency
            )));
        }
        Ok(())
    }
}
