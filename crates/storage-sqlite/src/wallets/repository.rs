use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use dompet_core::errors::Result;
use dompet_core::wallets::{NewWallet, Wallet, WalletFilter, WalletRepositoryTrait, WalletUpdate};

use super::model::WalletDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{not_found_as, StorageError};
use crate::schema::wallets;

pub struct WalletRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl WalletRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        WalletRepository { pool, writer }
    }
}

/// Loads one wallet on the given connection; shared with the unit of work.
pub(crate) fn find_wallet(conn: &mut SqliteConnection, wallet_id: &str) -> Result<Wallet> {
    let row = wallets::table
        .find(wallet_id)
        .select(WalletDB::as_select())
        .first::<WalletDB>(conn)
        .map_err(not_found_as("wallet", wallet_id))?;
    Wallet::try_from(row)
}

#[async_trait]
impl WalletRepositoryTrait for WalletRepository {
    async fn create(&self, new_wallet: NewWallet) -> Result<Wallet> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Wallet> {
                let id = new_wallet
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = WalletDB::from_new(new_wallet, id, Utc::now().naive_utc());
                let inserted = diesel::insert_into(wallets::table)
                    .values(&row)
                    .returning(WalletDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Wallet::try_from(inserted)
            })
            .await
    }

    async fn update(&self, wallet_update: WalletUpdate) -> Result<Wallet> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Wallet> {
                let mut wallet = find_wallet(conn, &wallet_update.id)?;
                wallet_update.apply_to(&mut wallet);
                wallet.updated_at = Utc::now().naive_utc();

                let row = WalletDB::from(wallet);
                let saved = diesel::update(wallets::table.find(row.id.clone()))
                    .set(&row)
                    .returning(WalletDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Wallet::try_from(saved)
            })
            .await
    }

    async fn deactivate(&self, wallet_id: &str) -> Result<()> {
        let wallet_id = wallet_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::update(
                    wallets::table
                        .find(&wallet_id)
                        .filter(wallets::is_active.eq(true)),
                )
                .set((
                    wallets::is_active.eq(false),
                    wallets::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(dompet_core::Error::not_found(format!(
                        "active wallet {}",
                        wallet_id
                    )));
                }
                Ok(())
            })
            .await
    }

    fn get_by_id(&self, wallet_id: &str) -> Result<Wallet> {
        let mut conn = get_connection(&self.pool)?;
        find_wallet(&mut conn, wallet_id)
    }

    fn list(&self, filter: &WalletFilter) -> Result<Vec<Wallet>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = wallets::table.into_boxed();
        if let Some(is_active) = filter.is_active {
            query = query.filter(wallets::is_active.eq(is_active));
        }
        if let Some(wallet_type) = filter.wallet_type {
            query = query.filter(wallets::wallet_type.eq(wallet_type.as_str()));
        }
        if let Some(currency) = &filter.currency {
            query = query.filter(wallets::currency.eq(currency.trim().to_uppercase()));
        }
        query
            .order(wallets::name.asc())
            .load::<WalletDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Wallet::try_from)
            .collect()
    }

    fn get_total_active_balance(&self) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        let balances = wallets::table
            .filter(wallets::is_active.eq(true))
            .select(wallets::balance)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        balances
            .iter()
            .map(|b| crate::utils::parse_decimal(b, "wallets.balance"))
            .sum()
    }
}
