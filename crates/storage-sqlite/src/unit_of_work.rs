//! SQLite implementation of the atomic unit used by the money-moving services.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;

use dompet_core::errors::Result;
use dompet_core::goals::{Goal, GoalContribution, NewGoalContribution};
use dompet_core::transactions::{NewTransaction, Transaction};
use dompet_core::transfers::{NewTransfer, Transfer};
use dompet_core::wallets::Wallet;
use dompet_core::{LedgerScope, UnitOfWork};

use crate::db::WriteHandle;
use crate::errors::StorageError;
use crate::schema::wallets;
use crate::wallets::find_wallet;
use crate::{goals, transactions, transfers};

/// Runs each unit as one job on the writer actor, i.e. inside a single
/// IMMEDIATE transaction. Units are therefore serialized with every other
/// write, and balances read inside a unit cannot change underneath it.
#[derive(Clone)]
pub struct SqliteUnitOfWork {
    writer: WriteHandle,
}

impl SqliteUnitOfWork {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn run_atomic<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerScope) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<T> {
                let mut scope = SqliteLedgerScope { conn };
                job(&mut scope)
            })
            .await
    }
}

/// Scope bound to the writer's connection for the duration of one unit.
struct SqliteLedgerScope<'c> {
    conn: &'c mut SqliteConnection,
}

impl LedgerScope for SqliteLedgerScope<'_> {
    fn get_wallet(&mut self, wallet_id: &str) -> Result<Wallet> {
        find_wallet(self.conn, wallet_id)
    }

    fn update_wallet_balance(&mut self, wallet_id: &str, new_balance: Decimal) -> Result<()> {
        let affected = diesel::update(wallets::table.find(wallet_id))
            .set((
                wallets::balance.eq(new_balance.to_string()),
                wallets::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(self.conn)
            .map_err(StorageError::from)?;
        if affected == 0 {
            return Err(dompet_core::Error::not_found(format!("wallet {}", wallet_id)));
        }
        Ok(())
    }

    fn insert_transaction(&mut self, new_transaction: NewTransaction) -> Result<Transaction> {
        transactions::insert_transaction(self.conn, new_transaction)
    }

    fn get_transaction(&mut self, transaction_id: &str) -> Result<Transaction> {
        transactions::find_transaction(self.conn, transaction_id)
    }

    fn delete_transaction(&mut self, transaction_id: &str) -> Result<()> {
        transactions::delete_transaction(self.conn, transaction_id)
    }

    fn insert_transfer(&mut self, new_transfer: NewTransfer) -> Result<Transfer> {
        transfers::insert_transfer(self.conn, new_transfer)
    }

    fn get_goal(&mut self, goal_id: &str) -> Result<Goal> {
        goals::find_goal(self.conn, goal_id)
    }

    fn add_goal_contribution(
        &mut self,
        contribution: NewGoalContribution,
    ) -> Result<GoalContribution> {
        goals::add_contribution(self.conn, contribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;
    use dompet_core::goals::{GoalStatus, NewGoal};
    use dompet_core::transactions::TransactionType;
    use dompet_core::wallets::{NewWallet, WalletType};
    use dompet_core::{LedgerConfig, LedgerServices};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn open_ledger() -> (LedgerServices, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage =
            SqliteStorage::open(&dir.path().join("ledger.db").to_string_lossy()).unwrap();
        let services = LedgerServices::new(
            storage.repositories(),
            storage.unit_of_work(),
            &LedgerConfig::default(),
        )
        .unwrap();
        (services, dir)
    }

    async fn wallet(services: &LedgerServices, name: &str, balance: Decimal) -> Wallet {
        services
            .wallet_service
            .create_wallet(NewWallet {
                id: None,
                name: name.to_string(),
                wallet_type: WalletType::Bank,
                currency: String::new(),
                initial_balance: balance,
                color: None,
                icon: None,
            })
            .await
            .unwrap()
    }

    fn expense(wallet_id: &str, amount: Decimal) -> NewTransaction {
        NewTransaction {
            id: None,
            wallet_id: wallet_id.to_string(),
            category_id: None,
            transaction_type: TransactionType::Expense,
            amount,
            description: "groceries".to_string(),
            tags: vec![],
            transaction_date: None,
        }
    }

    #[tokio::test]
    async fn test_expense_and_delete_round_trip_balance() {
        let (services, _dir) = open_ledger();
        let main = wallet(&services, "Main", dec!(1000000)).await;

        let posted = services
            .transaction_service
            .create_transaction(expense(&main.id, dec!(250000)))
            .await
            .unwrap();
        let after_post = services.wallet_service.get_wallet(&main.id).unwrap();
        assert_eq!(after_post.balance, dec!(750000));

        services
            .transaction_service
            .delete_transaction(&posted.id)
            .await
            .unwrap();
        let after_delete = services.wallet_service.get_wallet(&main.id).unwrap();
        assert_eq!(after_delete.balance, dec!(1000000));
        assert!(services
            .transaction_service
            .get_transaction(&posted.id)
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_insufficient_balance_leaves_no_trace() {
        let (services, _dir) = open_ledger();
        let main = wallet(&services, "Main", dec!(100)).await;

        let err = services
            .transaction_service
            .create_transaction(expense(&main.id, dec!(250)))
            .await
            .unwrap_err();
        assert!(err.is_insufficient_balance());

        let unchanged = services.wallet_service.get_wallet(&main.id).unwrap();
        assert_eq!(unchanged.balance, dec!(100));
        let listed = services
            .transaction_service
            .list_transactions(&Default::default(), Default::default())
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_transfer_moves_amount_and_fee() {
        let (services, _dir) = open_ledger();
        let source = wallet(&services, "Bank", dec!(1000000)).await;
        let target = wallet(&services, "Wallet", dec!(0)).await;

        let transfer = services
            .transfer_service
            .create_transfer(NewTransfer {
                id: None,
                from_wallet_id: source.id.clone(),
                to_wallet_id: target.id.clone(),
                amount: dec!(500000),
                fee: dec!(2500),
                note: "top up".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(transfer.total_deducted(), dec!(502500));

        let source = services.wallet_service.get_wallet(&source.id).unwrap();
        let target = services.wallet_service.get_wallet(&target.id).unwrap();
        assert_eq!(source.balance, dec!(497500));
        assert_eq!(target.balance, dec!(500000));
        assert_eq!(
            services
                .transfer_service
                .list_transfers(Some(&target.id))
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_transfer_over_balance_rolls_back_both_sides() {
        let (services, _dir) = open_ledger();
        let source = wallet(&services, "Bank", dec!(1000)).await;
        let target = wallet(&services, "Wallet", dec!(0)).await;

        let err = services
            .transfer_service
            .create_transfer(NewTransfer {
                id: None,
                from_wallet_id: source.id.clone(),
                to_wallet_id: target.id.clone(),
                amount: dec!(1000),
                fee: dec!(1),
                note: String::new(),
            })
            .await
            .unwrap_err();
        assert!(err.is_insufficient_balance());
        assert_eq!(
            services.wallet_service.get_wallet(&source.id).unwrap().balance,
            dec!(1000)
        );
        assert_eq!(
            services.wallet_service.get_wallet(&target.id).unwrap().balance,
            dec!(0)
        );
        assert!(services.transfer_service.list_transfers(None).unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_expenses_do_not_lose_updates() {
        let (services, _dir) = open_ledger();
        let main = wallet(&services, "Main", dec!(100000)).await;

        let mut handles = Vec::new();
        for _ in 0..20 {
            let service = services.transaction_service.clone();
            let wallet_id = main.id.clone();
            handles.push(tokio::spawn(async move {
                service.create_transaction(expense(&wallet_id, dec!(1500))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let main = services.wallet_service.get_wallet(&main.id).unwrap();
        assert_eq!(main.balance, dec!(70000));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_contributions_sum_and_complete_goal() {
        let (services, _dir) = open_ledger();
        let goal = services
            .goal_service
            .create_goal(NewGoal {
                id: None,
                name: "Laptop".to_string(),
                description: String::new(),
                target_amount: dec!(1000),
                deadline: None,
                color: None,
                icon: None,
            })
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let service = services.goal_service.clone();
            let goal_id = goal.id.clone();
            handles.push(tokio::spawn(async move {
                service.add_contribution(&goal_id, dec!(100), "monthly").await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let goal = services.goal_service.get_goal(&goal.id).unwrap();
        assert_eq!(goal.current_amount, dec!(1000));
        assert_eq!(goal.status, GoalStatus::Completed);
        assert_eq!(services.goal_service.get_contributions(&goal.id).unwrap().len(), 10);
    }
}
