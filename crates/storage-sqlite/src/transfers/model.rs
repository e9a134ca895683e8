//! Database models for transfers.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use dompet_core::errors::{Error, Result};
use dompet_core::transfers::{NewTransfer, Transfer};

use crate::utils::parse_decimal;

/// Database model for transfers
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transfers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransferDB {
    pub id: String,
    pub from_wallet_id: String,
    pub to_wallet_id: String,
    pub amount: String,
    pub fee: String,
    pub note: String,
    pub created_at: NaiveDateTime,
}

impl TransferDB {
    pub fn from_new(new_transfer: NewTransfer, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            from_wallet_id: new_transfer.from_wallet_id,
            to_wallet_id: new_transfer.to_wallet_id,
            amount: new_transfer.amount.to_string(),
            fee: new_transfer.fee.to_string(),
            note: new_transfer.note,
            created_at: now,
        }
    }
}

impl TryFrom<TransferDB> for Transfer {
    type Error = Error;

    fn try_from(db: TransferDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "transfers.amount")?,
            fee: parse_decimal(&db.fee, "transfers.fee")?,
            id: db.id,
            from_wallet_id: db.from_wallet_id,
            to_wallet_id: db.to_wallet_id,
            note: db.note,
            created_at: db.created_at,
        })
    }
}
