//! Transfer domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::validation::{validate_non_negative, validate_positive, validate_required_id};

/// Movement of `amount` from one wallet to another.
///
/// The fee is taken from the source only and is not credited anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub from_wallet_id: String,
    pub to_wallet_id: String,
    pub amount: Decimal,
    pub fee: Decimal,
    pub note: String,
    pub created_at: NaiveDateTime,
}

impl Transfer {
    /// Amount leaving the source wallet.
    pub fn total_deducted(&self) -> Decimal {
        self.amount + self.fee
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub from_wallet_id: String,
    pub to_wallet_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default)]
    pub note: String,
}

impl NewTransfer {
    pub fn normalized(mut self) -> Self {
        self.from_wallet_id = self.from_wallet_id.trim().to_string();
        self.to_wallet_id = self.to_wallet_id.trim().to_string();
        self.note = self.note.trim().to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_required_id("fromWalletId", &self.from_wallet_id)?;
        validate_required_id("toWalletId", &self.to_wallet_id)?;
        if self.from_wallet_id == self.to_wallet_id {
            return Err(Error::SameWalletTransfer);
        }
        validate_positive("amount", self.amount)?;
        validate_non_negative("fee", self.fee)?;
        Ok(())
    }

    pub fn total_deducted(&self) -> Decimal {
        self.amount + self.fee
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn transfer(from: &str, to: &str, amount: Decimal, fee: Decimal) -> NewTransfer {
        NewTransfer {
            id: None,
            from_wallet_id: from.to_string(),
            to_wallet_id: to.to_string(),
            amount,
            fee,
            note: "  rent ".to_string(),
        }
        .normalized()
    }

    #[test]
    fn test_validate_same_wallet() {
        let err = transfer("a", " a ", dec!(10), dec!(0)).validate().unwrap_err();
        assert!(matches!(err, Error::SameWalletTransfer));
    }

    #[test]
    fn test_validate_amounts() {
        assert!(transfer("a", "b", dec!(0), dec!(0)).validate().unwrap_err().is_validation());
        assert!(transfer("a", "b", dec!(5), dec!(-1)).validate().unwrap_err().is_validation());
        assert!(transfer("a", "b", dec!(5), dec!(0)).validate().is_ok());
    }

    #[test]
    fn test_total_deducted_and_note_trim() {
        let t = transfer("a", "b", dec!(100000), dec!(2000));
        assert_eq!(t.total_deducted(), dec!(102000));
        assert_eq!(t.note, "rent");
    }
}
