//! Transactional boundary for the money-moving operations.
//!
//! Every operation that writes a balance together with a ledger row runs as a
//! single [`UnitOfWork::run_atomic`] call. The closure receives a
//! [`LedgerScope`] bound to one storage transaction; everything it writes is
//! committed when it returns `Ok` and discarded when it returns `Err`.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::goals::{Goal, GoalContribution, NewGoalContribution};
use crate::transactions::{NewTransaction, Transaction};
use crate::transfers::{NewTransfer, Transfer};
use crate::wallets::Wallet;

/// Repository operations available inside an atomic unit.
///
/// Implementations must route every call through the same underlying storage
/// transaction. Reads observe the writes made earlier in the same unit.
pub trait LedgerScope {
    fn get_wallet(&mut self, wallet_id: &str) -> Result<Wallet>;

    /// Sets the wallet balance to an absolute value.
    fn update_wallet_balance(&mut self, wallet_id: &str, new_balance: Decimal) -> Result<()>;

    fn insert_transaction(&mut self, new_transaction: NewTransaction) -> Result<Transaction>;

    fn get_transaction(&mut self, transaction_id: &str) -> Result<Transaction>;

    fn delete_transaction(&mut self, transaction_id: &str) -> Result<()>;

    fn insert_transfer(&mut self, new_transfer: NewTransfer) -> Result<Transfer>;

    fn get_goal(&mut self, goal_id: &str) -> Result<Goal>;

    /// Inserts the contribution and increments the goal's current amount by
    /// the contribution amount (`current_amount = current_amount + amount`).
    fn add_goal_contribution(
        &mut self,
        contribution: NewGoalContribution,
    ) -> Result<GoalContribution>;
}

/// Runs closures of [`LedgerScope`] calls atomically.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Commits on `Ok`, rolls back on `Err` and returns the closure's error.
    ///
    /// Dropping the returned future before it completes must not leave a
    /// partial effect behind.
    async fn run_atomic<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerScope) -> Result<T> + Send + 'static,
        T: Send + 'static;
}
