//! Database models for transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use dompet_core::errors::{Error, Result};
use dompet_core::transactions::{NewTransaction, Transaction};

use crate::utils::{decode_tags, encode_tags, parse_decimal, parse_label};

/// Database model for transactions
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub wallet_id: String,
    pub category_id: Option<String>,
    pub transaction_type: String,
    pub amount: String,
    pub description: String,
    /// JSON array of lowercase tags.
    pub tags: String,
    pub transaction_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TransactionDB {
    pub fn from_new(
        new_transaction: NewTransaction,
        id: String,
        transaction_date: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<Self> {
        Ok(Self {
            id,
            tags: encode_tags(&new_transaction.tags)?,
            wallet_id: new_transaction.wallet_id,
            category_id: new_transaction.category_id,
            transaction_type: new_transaction.transaction_type.as_str().to_string(),
            amount: new_transaction.amount.to_string(),
            description: new_transaction.description,
            transaction_date,
            created_at: now,
            updated_at: now,
        })
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self> {
        Ok(Self {
            transaction_type: parse_label(&db.transaction_type, "transactions.transaction_type")?,
            amount: parse_decimal(&db.amount, "transactions.amount")?,
            tags: decode_tags(&db.tags)?,
            id: db.id,
            wallet_id: db.wallet_id,
            category_id: db.category_id,
            description: db.description,
            transaction_date: db.transaction_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
