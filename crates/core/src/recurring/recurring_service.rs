use chrono::{Datelike, NaiveDate};
use log::{debug, error, info};
use std::sync::Arc;

use super::recurring_model::{NewRecurringTransaction, RecurringTransaction};
use super::recurring_traits::{RecurringRepositoryTrait, RecurringServiceTrait};
use crate::errors::{Result, ResultExt};
use crate::transactions::TransactionServiceTrait;
use crate::utils::time_utils;
use crate::wallets::WalletRepositoryTrait;

/// Service for recurring templates and the due-date processor
pub struct RecurringService {
    repository: Arc<dyn RecurringRepositoryTrait>,
    wallet_repository: Arc<dyn WalletRepositoryTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
}

impl RecurringService {
    pub fn new(
        repository: Arc<dyn RecurringRepositoryTrait>,
        wallet_repository: Arc<dyn WalletRepositoryTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
    ) -> Self {
        Self {
            repository,
            wallet_repository,
            transaction_service,
        }
    }

    /// Generates the transaction for one template, then advances and persists it.
    ///
    /// The two steps are separate atomic units. If the second fails the template
    /// keeps its old due date and is generated again on the next run.
    async fn process_one(&self, mut recurring: RecurringTransaction) -> Result<()> {
        let transaction = self
            .transaction_service
            .create_transaction(recurring.to_new_transaction())
            .await?;
        debug!(
            "Recurring {} generated transaction {} dated {}",
            recurring.id, transaction.id, recurring.next_due
        );

        recurring.advance_next_due()?;
        self.repository
            .update(recurring)
            .await
            .context("Failed to advance recurring transaction")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl RecurringServiceTrait for RecurringService {
    async fn create_recurring(
        &self,
        new_recurring: NewRecurringTransaction,
    ) -> Result<RecurringTransaction> {
        let new_recurring = new_recurring.normalized();
        new_recurring.validate()?;
        self.wallet_repository
            .get_by_id(&new_recurring.wallet_id)
            .context("Wallet not found")?;
        self.repository.create(new_recurring).await
    }

    async fn update_recurring(
        &self,
        mut recurring: RecurringTransaction,
    ) -> Result<RecurringTransaction> {
        recurring.description = recurring.description.trim().to_string();
        let stored = self.repository.get_by_id(&recurring.id)?;
        if stored.next_due != recurring.next_due {
            // A rescheduled template anchors on its new due date.
            recurring.anchor_day = recurring.next_due.day();
        }
        recurring.validate()?;
        self.repository.update(recurring).await
    }

    async fn delete_recurring(&self, recurring_id: &str) -> Result<()> {
        self.repository.delete(recurring_id).await
    }

    fn get_recurring(&self, recurring_id: &str) -> Result<RecurringTransaction> {
        self.repository.get_by_id(recurring_id)
    }

    fn list_recurring(&self, active_only: bool) -> Result<Vec<RecurringTransaction>> {
        self.repository.list(active_only)
    }

    async fn process_due(&self) -> Result<usize> {
        self.process_due_as_of(time_utils::today()).await
    }

    async fn process_due_as_of(&self, as_of: NaiveDate) -> Result<usize> {
        let due = self
            .repository
            .get_due(as_of)
            .context("Failed to load due recurring transactions")?;
        let total = due.len();

        let mut processed = 0;
        for recurring in due {
            let recurring_id = recurring.id.clone();
            match self.process_one(recurring).await {
                Ok(()) => processed += 1,
                Err(e) => error!("Failed to process recurring {}: {}", recurring_id, e),
            }
        }

        if total > 0 {
            info!(
                "Processed {} of {} due recurring transactions as of {}",
                processed, total, as_of
            );
        }
        Ok(processed)
    }
}
