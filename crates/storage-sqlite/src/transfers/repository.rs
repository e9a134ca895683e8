use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use dompet_core::errors::Result;
use dompet_core::transfers::{NewTransfer, Transfer, TransferRepositoryTrait};

use super::model::TransferDB;
use crate::db::get_connection;
use crate::errors::{not_found_as, StorageError};
use crate::schema::transfers;

/// Read side of transfers; they are recorded by `SqliteUnitOfWork`.
pub struct TransferRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl TransferRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        TransferRepository { pool }
    }
}

pub(crate) fn insert_transfer(
    conn: &mut SqliteConnection,
    new_transfer: NewTransfer,
) -> Result<Transfer> {
    let id = new_transfer
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let row = TransferDB::from_new(new_transfer, id, Utc::now().naive_utc());
    let inserted = diesel::insert_into(transfers::table)
        .values(&row)
        .returning(TransferDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    Transfer::try_from(inserted)
}

impl TransferRepositoryTrait for TransferRepository {
    fn get_by_id(&self, transfer_id: &str) -> Result<Transfer> {
        let mut conn = get_connection(&self.pool)?;
        let row = transfers::table
            .find(transfer_id)
            .first::<TransferDB>(&mut conn)
            .map_err(not_found_as("transfer", transfer_id))?;
        Transfer::try_from(row)
    }

    fn list(&self, wallet_id: Option<&str>) -> Result<Vec<Transfer>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transfers::table.into_boxed();
        if let Some(wallet_id) = wallet_id {
            query = query.filter(
                transfers::from_wallet_id
                    .eq(wallet_id)
                    .or(transfers::to_wallet_id.eq(wallet_id)),
            );
        }
        query
            .order((transfers::created_at.desc(), transfers::id.desc()))
            .load::<TransferDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Transfer::try_from)
            .collect()
    }
}
