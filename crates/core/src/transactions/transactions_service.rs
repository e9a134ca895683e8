use log::debug;
use std::sync::Arc;

use super::transactions_model::{
    CategorySummary, ListParams, NewTransaction, Transaction, TransactionFilter,
    TransactionSummary, TransactionType,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::{Result, ResultExt};
use crate::unit_of_work::UnitOfWork;
use crate::utils::time_utils;

/// Service for posting and reversing transactions (generic over the unit of work)
pub struct TransactionService<U: UnitOfWork + Clone> {
    repository: Arc<dyn TransactionRepositoryTrait>,
    unit_of_work: U,
}

impl<U: UnitOfWork + Clone> TransactionService<U> {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>, unit_of_work: U) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }
}

#[async_trait::async_trait]
impl<U: UnitOfWork + Clone + 'static> TransactionServiceTrait for TransactionService<U> {
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let mut new_transaction = new_transaction.normalized();
        new_transaction.validate()?;
        if new_transaction.transaction_date.is_none() {
            new_transaction.transaction_date = Some(time_utils::now());
        }

        debug!(
            "Creating {} of {} on wallet {}",
            new_transaction.transaction_type, new_transaction.amount, new_transaction.wallet_id
        );

        self.unit_of_work
            .run_atomic(move |scope| {
                let wallet = scope
                    .get_wallet(&new_transaction.wallet_id)
                    .context("Failed to load wallet")?;
                wallet.ensure_active()?;
                if new_transaction.transaction_type == TransactionType::Expense {
                    wallet.ensure_can_cover(new_transaction.amount)?;
                }
                let new_balance = wallet.balance + new_transaction.balance_effect();

                let transaction = scope
                    .insert_transaction(new_transaction)
                    .context("Failed to insert transaction")?;
                scope
                    .update_wallet_balance(&wallet.id, new_balance)
                    .context("Failed to update wallet balance")?;
                Ok(transaction)
            })
            .await
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        let transaction_id = transaction_id.to_string();
        debug!("Deleting transaction {}", transaction_id);

        self.unit_of_work
            .run_atomic(move |scope| {
                let transaction = scope
                    .get_transaction(&transaction_id)
                    .context("Failed to load transaction")?;
                let wallet = scope
                    .get_wallet(&transaction.wallet_id)
                    .context("Failed to load wallet")?;
                // Taking back an income must not leave the wallet negative.
                if transaction.transaction_type == TransactionType::Income {
                    wallet.ensure_can_cover(transaction.amount)?;
                }
                // Reversal is applied to the current balance as read in this unit.
                let new_balance = wallet.balance - transaction.balance_effect();

                scope
                    .delete_transaction(&transaction.id)
                    .context("Failed to delete transaction")?;
                scope
                    .update_wallet_balance(&wallet.id, new_balance)
                    .context("Failed to update wallet balance")?;
                Ok(())
            })
            .await
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_by_id(transaction_id)
    }

    fn list_transactions(
        &self,
        filter: &TransactionFilter,
        params: ListParams,
    ) -> Result<Vec<Transaction>> {
        filter.validate()?;
        self.repository.list(&filter.normalized(), params.normalized())
    }

    fn get_summary(&self, filter: &TransactionFilter) -> Result<TransactionSummary> {
        filter.validate()?;
        self.repository.get_summary(&filter.normalized())
    }

    fn get_monthly_summary(&self, year: i32, month: u32) -> Result<TransactionSummary> {
        let (first, last) = time_utils::month_bounds(year, month)?;
        self.get_summary(&TransactionFilter::for_period(first, last))
    }

    fn get_category_summary(&self, filter: &TransactionFilter) -> Result<Vec<CategorySummary>> {
        filter.validate()?;
        self.repository.get_category_summary(&filter.normalized())
    }
}
