use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use dompet_core::errors::Result;
use dompet_core::recurring::{
    NewRecurringTransaction, RecurringRepositoryTrait, RecurringTransaction,
};

use super::model::RecurringTransactionDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{not_found_as, StorageError};
use crate::schema::recurring_transactions;

pub struct RecurringRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl RecurringRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        RecurringRepository { pool, writer }
    }
}

fn into_domain(rows: Vec<RecurringTransactionDB>) -> Result<Vec<RecurringTransaction>> {
    rows.into_iter().map(RecurringTransaction::try_from).collect()
}

#[async_trait]
impl RecurringRepositoryTrait for RecurringRepository {
    async fn create(&self, new_recurring: NewRecurringTransaction) -> Result<RecurringTransaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<RecurringTransaction> {
                let id = new_recurring
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = RecurringTransactionDB::from_new(new_recurring, id, Utc::now().naive_utc());
                let inserted = diesel::insert_into(recurring_transactions::table)
                    .values(&row)
                    .returning(RecurringTransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                RecurringTransaction::try_from(inserted)
            })
            .await
    }

    async fn update(&self, recurring: RecurringTransaction) -> Result<RecurringTransaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<RecurringTransaction> {
                let recurring_id = recurring.id.clone();
                let row = RecurringTransactionDB::from(recurring);
                let saved = diesel::update(recurring_transactions::table.find(&recurring_id))
                    .set((
                        recurring_transactions::wallet_id.eq(&row.wallet_id),
                        recurring_transactions::category_id.eq(row.category_id.clone()),
                        recurring_transactions::transaction_type.eq(&row.transaction_type),
                        recurring_transactions::amount.eq(&row.amount),
                        recurring_transactions::description.eq(&row.description),
                        recurring_transactions::frequency.eq(&row.frequency),
                        recurring_transactions::next_due.eq(row.next_due),
                        recurring_transactions::anchor_day.eq(row.anchor_day),
                        recurring_transactions::end_date.eq(row.end_date),
                        recurring_transactions::is_active.eq(row.is_active),
                        recurring_transactions::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(RecurringTransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(not_found_as("recurring transaction", &recurring_id))?;
                RecurringTransaction::try_from(saved)
            })
            .await
    }

    async fn delete(&self, recurring_id: &str) -> Result<()> {
        let recurring_id = recurring_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(recurring_transactions::table.find(&recurring_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(dompet_core::Error::not_found(format!(
                        "recurring transaction {}",
                        recurring_id
                    )));
                }
                Ok(())
            })
            .await
    }

    fn get_by_id(&self, recurring_id: &str) -> Result<RecurringTransaction> {
        let mut conn = get_connection(&self.pool)?;
        let row = recurring_transactions::table
            .find(recurring_id)
            .first::<RecurringTransactionDB>(&mut conn)
            .map_err(not_found_as("recurring transaction", recurring_id))?;
        RecurringTransaction::try_from(row)
    }

    fn list(&self, active_only: bool) -> Result<Vec<RecurringTransaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = recurring_transactions::table.into_boxed();
        if active_only {
            query = query.filter(recurring_transactions::is_active.eq(true));
        }
        let rows = query
            .order((
                recurring_transactions::next_due.asc(),
                recurring_transactions::id.asc(),
            ))
            .load::<RecurringTransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_domain(rows)
    }

    fn get_due(&self, as_of: NaiveDate) -> Result<Vec<RecurringTransaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = recurring_transactions::table
            .filter(recurring_transactions::is_active.eq(true))
            .filter(recurring_transactions::next_due.le(as_of))
            .order((
                recurring_transactions::next_due.asc(),
                recurring_transactions::id.asc(),
            ))
            .load::<RecurringTransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_domain(rows)
    }
}
