use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use dompet_core::errors::Result;
use dompet_core::transactions::{
    summarize, summarize_by_category, CategorySummary, ListParams, NewTransaction, Transaction,
    TransactionFilter, TransactionRepositoryTrait, TransactionSummary,
};
use dompet_core::utils::time_utils;

use super::model::TransactionDB;
use crate::db::get_connection;
use crate::errors::{not_found_as, StorageError};
use crate::schema::{categories, transactions};

/// Read side of the transaction ledger. Writes only happen inside an atomic
/// unit, see `SqliteUnitOfWork`.
pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        TransactionRepository { pool }
    }

    /// Rows matching `filter`, newest business date first.
    ///
    /// Wallet, category, type and date bounds are applied in SQL. The
    /// description search and tag match run in-process so they behave exactly
    /// like `TransactionFilter::matches`; when either is set, paging happens
    /// after that second pass.
    fn load_filtered(
        &self,
        filter: &TransactionFilter,
        params: Option<ListParams>,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let needs_post_filter = filter.search.is_some() || !filter.tags.is_empty();

        let mut query = filtered_query(filter).order((
            transactions::transaction_date.desc(),
            transactions::created_at.desc(),
        ));
        if let (Some(params), false) = (params, needs_post_filter) {
            query = query.limit(params.limit).offset(params.offset);
        }
        let rows = query
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        let transactions = rows
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>>>()?;
        if !needs_post_filter {
            return Ok(transactions);
        }

        let matching = transactions.into_iter().filter(|t| filter.matches(t));
        Ok(match params {
            Some(params) => matching
                .skip(usize::try_from(params.offset).unwrap_or(0))
                .take(usize::try_from(params.limit).unwrap_or(0))
                .collect(),
            None => matching.collect(),
        })
    }
}

fn filtered_query(filter: &TransactionFilter) -> transactions::BoxedQuery<'_, Sqlite> {
    let mut query = transactions::table.into_boxed();
    if let Some(wallet_id) = &filter.wallet_id {
        query = query.filter(transactions::wallet_id.eq(wallet_id));
    }
    if let Some(category_id) = &filter.category_id {
        query = query.filter(transactions::category_id.eq(category_id));
    }
    if let Some(transaction_type) = filter.transaction_type {
        query = query.filter(transactions::transaction_type.eq(transaction_type.as_str()));
    }
    if let Some(start) = filter.start_date {
        query = query.filter(transactions::transaction_date.ge(time_utils::start_of_day(start)));
    }
    // Inclusive end date: everything before the following midnight.
    if let Some(next_day) = filter.end_date.and_then(|end| end.succ_opt()) {
        query = query.filter(transactions::transaction_date.lt(time_utils::start_of_day(next_day)));
    }
    query
}

pub(crate) fn find_transaction(
    conn: &mut SqliteConnection,
    transaction_id: &str,
) -> Result<Transaction> {
    let row = transactions::table
        .find(transaction_id)
        .select(TransactionDB::as_select())
        .first::<TransactionDB>(conn)
        .map_err(not_found_as("transaction", transaction_id))?;
    Transaction::try_from(row)
}

pub(crate) fn insert_transaction(
    conn: &mut SqliteConnection,
    new_transaction: NewTransaction,
) -> Result<Transaction> {
    let id = new_transaction
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let transaction_date = new_transaction
        .transaction_date
        .unwrap_or_else(time_utils::now);
    let row = TransactionDB::from_new(new_transaction, id, transaction_date, Utc::now().naive_utc())?;
    let inserted = diesel::insert_into(transactions::table)
        .values(&row)
        .returning(TransactionDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    Transaction::try_from(inserted)
}

pub(crate) fn delete_transaction(conn: &mut SqliteConnection, transaction_id: &str) -> Result<()> {
    let affected = diesel::delete(transactions::table.find(transaction_id))
        .execute(conn)
        .map_err(StorageError::from)?;
    if affected == 0 {
        return Err(dompet_core::Error::not_found(format!(
            "transaction {}",
            transaction_id
        )));
    }
    Ok(())
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        find_transaction(&mut conn, transaction_id)
    }

    fn list(&self, filter: &TransactionFilter, params: ListParams) -> Result<Vec<Transaction>> {
        self.load_filtered(filter, Some(params))
    }

    fn get_summary(&self, filter: &TransactionFilter) -> Result<TransactionSummary> {
        Ok(summarize(&self.load_filtered(filter, None)?))
    }

    fn get_category_summary(&self, filter: &TransactionFilter) -> Result<Vec<CategorySummary>> {
        let transactions = self.load_filtered(filter, None)?;
        let category_ids: Vec<String> = transactions
            .iter()
            .filter_map(|t| t.category_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut names: HashMap<String, String> = HashMap::new();
        if !category_ids.is_empty() {
            let mut conn = get_connection(&self.pool)?;
            for chunk in category_ids.chunks(500) {
                let rows = categories::table
                    .filter(categories::id.eq_any(chunk))
                    .select((categories::id, categories::name))
                    .load::<(String, String)>(&mut conn)
                    .map_err(StorageError::from)?;
                names.extend(rows);
            }
        }

        let rows = transactions.into_iter().map(|t| {
            let name = t.category_id.as_ref().and_then(|id| names.get(id).cloned());
            (t.category_id, name, t.amount)
        });
        Ok(summarize_by_category(rows))
    }
}
