//! Transaction repository and service traits.

use async_trait::async_trait;

use super::transactions_model::{
    CategorySummary, ListParams, NewTransaction, Transaction, TransactionFilter,
    TransactionSummary,
};
use crate::errors::Result;

/// Read side of the transaction store.
///
/// Inserts and deletes happen through [`crate::unit_of_work::LedgerScope`]
/// because they always travel with a balance update.
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction>;

    /// Lists matching transactions, newest business date first.
    fn list(&self, filter: &TransactionFilter, params: ListParams) -> Result<Vec<Transaction>>;

    fn get_summary(&self, filter: &TransactionFilter) -> Result<TransactionSummary>;

    fn get_category_summary(&self, filter: &TransactionFilter) -> Result<Vec<CategorySummary>>;
}

#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Posts a transaction and applies it to the wallet balance atomically.
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Deletes a transaction and reverses its balance effect atomically.
    async fn delete_transaction(&self, transaction_id: &str) -> Result<()>;

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    fn list_transactions(
        &self,
        filter: &TransactionFilter,
        params: ListParams,
    ) -> Result<Vec<Transaction>>;

    fn get_summary(&self, filter: &TransactionFilter) -> Result<TransactionSummary>;

    /// Summary for the first through last day of the given month.
    fn get_monthly_summary(&self, year: i32, month: u32) -> Result<TransactionSummary>;

    fn get_category_summary(&self, filter: &TransactionFilter) -> Result<Vec<CategorySummary>>;
}
