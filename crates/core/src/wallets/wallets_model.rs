//! Wallet domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::validation::{trim_optional, validate_name, validate_non_negative};

/// Kind of monetary account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    Cash,
    Bank,
    Ewallet,
}

impl WalletType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletType::Cash => "cash",
            WalletType::Bank => "bank",
            WalletType::Ewallet => "ewallet",
        }
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(WalletType::Cash),
            "bank" => Ok(WalletType::Bank),
            "ewallet" => Ok(WalletType::Ewallet),
            other => Err(Error::invalid_input(format!(
                "Invalid wallet type '{}': must be cash, bank or ewallet",
                other
            ))),
        }
    }
}

/// Domain model representing a wallet.
///
/// `balance` is only written by the money-moving services inside an atomic unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub wallet_type: WalletType,
    pub balance: Decimal,
    pub currency: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Wallet {
    /// Fails with `InactiveWallet` for soft-deleted wallets.
    pub fn ensure_active(&self) -> Result<()> {
        if self.is_active {
            Ok(())
        } else {
            Err(Error::InactiveWallet(self.id.clone()))
        }
    }

    /// Fails with `InsufficientBalance` unless the wallet can cover `required`.
    pub fn ensure_can_cover(&self, required: Decimal) -> Result<()> {
        if self.balance >= required {
            Ok(())
        } else {
            Err(Error::InsufficientBalance {
                wallet_id: self.id.clone(),
                available: self.balance,
                required,
            })
        }
    }
}

/// Input model for creating a new wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWallet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub wallet_type: WalletType,
    /// Empty means "use the configured default currency".
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub initial_balance: Decimal,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl NewWallet {
    /// Trims text fields and fills in the default currency.
    pub fn normalized(mut self, default_currency: &str) -> Self {
        self.name = self.name.trim().to_string();
        let currency = self.currency.trim();
        self.currency = if currency.is_empty() {
            default_currency.to_uppercase()
        } else {
            currency.to_uppercase()
        };
        self.color = trim_optional(self.color);
        self.icon = trim_optional(self.icon);
        self
    }

    /// Validates the new wallet data.
    pub fn validate(&self) -> Result<()> {
        validate_name("name", &self.name)?;
        validate_currency(&self.currency)?;
        validate_non_negative("initial balance", self.initial_balance)?;
        Ok(())
    }
}

/// Input model for updating the cosmetic fields of a wallet.
///
/// Balance and currency cannot be changed through this path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletUpdate {
    pub id: String,
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl WalletUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_input("Wallet ID is required for updates"));
        }
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        Ok(())
    }

    /// Applies the update onto an existing wallet.
    pub fn apply_to(&self, wallet: &mut Wallet) {
        if let Some(name) = &self.name {
            wallet.name = name.trim().to_string();
        }
        if self.color.is_some() {
            wallet.color = trim_optional(self.color.clone());
        }
        if self.icon.is_some() {
            wallet.icon = trim_optional(self.icon.clone());
        }
    }
}

/// Filter for wallet listings. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletFilter {
    pub is_active: Option<bool>,
    pub wallet_type: Option<WalletType>,
    pub currency: Option<String>,
}

impl WalletFilter {
    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Default::default()
        }
    }

    pub fn matches(&self, wallet: &Wallet) -> bool {
        self.is_active.map_or(true, |active| wallet.is_active == active)
            && self.wallet_type.map_or(true, |t| wallet.wallet_type == t)
            && self
                .currency
                .as_ref()
                .map_or(true, |c| wallet.currency.eq_ignore_ascii_case(c))
    }
}

/// A currency is a 3-letter alphabetic code, already uppercased.
pub(crate) fn validate_currency(currency: &str) -> Result<()> {
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(Error::invalid_input(format!(
            "Currency '{}' must be a 3-letter code",
            currency
        )));
    }
    Ok(())
}
