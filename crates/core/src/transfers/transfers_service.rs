use log::debug;
use std::sync::Arc;

use super::transfers_model::{NewTransfer, Transfer};
use super::transfers_traits::{TransferRepositoryTrait, TransferServiceTrait};
use crate::errors::{Result, ResultExt};
use crate::unit_of_work::UnitOfWork;

/// Service for moving money between wallets
pub struct TransferService<U: UnitOfWork + Clone> {
    repository: Arc<dyn TransferRepositoryTrait>,
    unit_of_work: U,
}

impl<U: UnitOfWork + Clone> TransferService<U> {
    pub fn new(repository: Arc<dyn TransferRepositoryTrait>, unit_of_work: U) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }
}

#[async_trait::async_trait]
impl<U: UnitOfWork + Clone + 'static> TransferServiceTrait for TransferService<U> {
    async fn create_transfer(&self, new_transfer: NewTransfer) -> Result<Transfer> {
        let new_transfer = new_transfer.normalized();
        new_transfer.validate()?;

        debug!(
            "Transferring {} (fee {}) from {} to {}",
            new_transfer.amount,
            new_transfer.fee,
            new_transfer.from_wallet_id,
            new_transfer.to_wallet_id
        );

        self.unit_of_work
            .run_atomic(move |scope| {
                let source = scope
                    .get_wallet(&new_transfer.from_wallet_id)
                    .context("Failed to load source wallet")?;
                let destination = scope
                    .get_wallet(&new_transfer.to_wallet_id)
                    .context("Failed to load destination wallet")?;
                source.ensure_active()?;
                destination.ensure_active()?;

                let total_deducted = new_transfer.total_deducted();
                source.ensure_can_cover(total_deducted)?;
                let source_balance = source.balance - total_deducted;
                let destination_balance = destination.balance + new_transfer.amount;

                let transfer = scope
                    .insert_transfer(new_transfer)
                    .context("Failed to insert transfer")?;
                scope
                    .update_wallet_balance(&source.id, source_balance)
                    .context("Failed to update source wallet balance")?;
                scope
                    .update_wallet_balance(&destination.id, destination_balance)
                    .context("Failed to update destination wallet balance")?;
                Ok(transfer)
            })
            .await
    }

    fn get_transfer(&self, transfer_id: &str) -> Result<Transfer> {
        self.repository.get_by_id(transfer_id)
    }

    fn list_transfers(&self, wallet_id: Option<&str>) -> Result<Vec<Transfer>> {
        self.repository.list(wallet_id)
    }
}
