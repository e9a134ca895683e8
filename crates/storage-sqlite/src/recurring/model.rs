//! Database models for recurring transactions.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use dompet_core::errors::{Error, Result};
use dompet_core::recurring::{NewRecurringTransaction, RecurringTransaction};

use crate::utils::{parse_decimal, parse_label};

/// Database model for recurring transactions
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::recurring_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecurringTransactionDB {
    pub id: String,
    pub wallet_id: String,
    pub category_id: Option<String>,
    pub transaction_type: String,
    pub amount: String,
    pub description: String,
    pub frequency: String,
    pub next_due: NaiveDate,
    pub anchor_day: i32,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl RecurringTransactionDB {
    pub fn from_new(new_recurring: NewRecurringTransaction, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            wallet_id: new_recurring.wallet_id,
            category_id: new_recurring.category_id,
            transaction_type: new_recurring.transaction_type.as_str().to_string(),
            amount: new_recurring.amount.to_string(),
            description: new_recurring.description,
            frequency: new_recurring.frequency.as_str().to_string(),
            next_due: new_recurring.next_due,
            anchor_day: new_recurring.next_due.day() as i32,
            end_date: new_recurring.end_date,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<RecurringTransactionDB> for RecurringTransaction {
    type Error = Error;

    fn try_from(db: RecurringTransactionDB) -> Result<Self> {
        let anchor_day = u32::try_from(db.anchor_day).map_err(|_| {
            Error::Unexpected(format!(
                "Invalid recurring_transactions.anchor_day {} for {}",
                db.anchor_day, db.id
            ))
        })?;
        Ok(Self {
            transaction_type: parse_label(
                &db.transaction_type,
                "recurring_transactions.transaction_type",
            )?,
            amount: parse_decimal(&db.amount, "recurring_transactions.amount")?,
            frequency: parse_label(&db.frequency, "recurring_transactions.frequency")?,
            id: db.id,
            wallet_id: db.wallet_id,
            category_id: db.category_id,
            description: db.description,
            next_due: db.next_due,
            anchor_day,
            end_date: db.end_date,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<RecurringTransaction> for RecurringTransactionDB {
    fn from(domain: RecurringTransaction) -> Self {
        Self {
            id: domain.id,
            wallet_id: domain.wallet_id,
            category_id: domain.category_id,
            transaction_type: domain.transaction_type.as_str().to_string(),
            amount: domain.amount.to_string(),
            description: domain.description,
            frequency: domain.frequency.as_str().to_string(),
            next_due: domain.next_due,
            anchor_day: domain.anchor_day as i32,
            end_date: domain.end_date,
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
