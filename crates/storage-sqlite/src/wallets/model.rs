//! Database models for wallets.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use dompet_core::errors::{Error, Result};
use dompet_core::wallets::{NewWallet, Wallet};

use crate::utils::{parse_decimal, parse_label};

/// Database model for wallets
#[derive(Queryable, Identifiable, Insertable, Selectable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::wallets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct WalletDB {
    pub id: String,
    pub name: String,
    pub wallet_type: String,
    pub balance: String,
    pub currency: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl WalletDB {
    pub fn from_new(new_wallet: NewWallet, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: new_wallet.name,
            wallet_type: new_wallet.wallet_type.as_str().to_string(),
            balance: new_wallet.initial_balance.to_string(),
            currency: new_wallet.currency,
            color: new_wallet.color,
            icon: new_wallet.icon,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<WalletDB> for Wallet {
    type Error = Error;

    fn try_from(db: WalletDB) -> Result<Self> {
        Ok(Self {
            wallet_type: parse_label(&db.wallet_type, "wallets.wallet_type")?,
            balance: parse_decimal(&db.balance, "wallets.balance")?,
            id: db.id,
            name: db.name,
            currency: db.currency,
            color: db.color,
            icon: db.icon,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Wallet> for WalletDB {
    fn from(domain: Wallet) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            wallet_type: domain.wallet_type.as_str().to_string(),
            balance: domain.balance.to_string(),
            currency: domain.currency,
            color: domain.color,
            icon: domain.icon,
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
