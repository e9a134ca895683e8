//! Bundles the SQLite repositories and unit of work for service wiring.

use std::sync::Arc;

use log::info;

use dompet_core::errors::Result;
use dompet_core::LedgerRepositories;

use crate::budgets::BudgetRepository;
use crate::categories::CategoryRepository;
use crate::db::{self, DbPool, WriteHandle};
use crate::goals::GoalRepository;
use crate::recurring::RecurringRepository;
use crate::transactions::TransactionRepository;
use crate::transfers::TransferRepository;
use crate::unit_of_work::SqliteUnitOfWork;
use crate::wallets::WalletRepository;

#[derive(Clone)]
pub struct SqliteStorage {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteStorage {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// Prepares the database file, applies pending migrations and starts the
    /// writer actor. Must be called from within a Tokio runtime.
    pub fn open(db_path: &str) -> Result<Self> {
        let db_path = db::init(db_path)?;
        let pool = db::create_pool(&db_path)?;
        db::run_migrations(&pool)?;
        let writer = db::spawn_writer((*pool).clone());
        info!("SQLite storage ready at {}", db_path);
        Ok(Self::new(pool, writer))
    }

    pub fn pool(&self) -> Arc<DbPool> {
        self.pool.clone()
    }

    pub fn repositories(&self) -> LedgerRepositories {
        LedgerRepositories {
            wallets: Arc::new(WalletRepository::new(self.pool.clone(), self.writer.clone())),
            categories: Arc::new(CategoryRepository::new(
                self.pool.clone(),
                self.writer.clone(),
            )),
            transactions: Arc::new(TransactionRepository::new(self.pool.clone())),
            transfers: Arc::new(TransferRepository::new(self.pool.clone())),
            budgets: Arc::new(BudgetRepository::new(self.pool.clone(), self.writer.clone())),
            goals: Arc::new(GoalRepository::new(self.pool.clone(), self.writer.clone())),
            recurring: Arc::new(RecurringRepository::new(
                self.pool.clone(),
                self.writer.clone(),
            )),
        }
    }

    pub fn unit_of_work(&self) -> SqliteUnitOfWork {
        SqliteUnitOfWork::new(self.writer.clone())
    }
}
