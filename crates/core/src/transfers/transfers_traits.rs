//! Transfer repository and service traits.

use async_trait::async_trait;

use super::transfers_model::{NewTransfer, Transfer};
use crate::errors::Result;

/// Read side of the transfer store. Inserts go through the unit of work.
pub trait TransferRepositoryTrait: Send + Sync {
    fn get_by_id(&self, transfer_id: &str) -> Result<Transfer>;

    /// Lists transfers touching `wallet_id` on either side (all when `None`), newest first.
    fn list(&self, wallet_id: Option<&str>) -> Result<Vec<Transfer>>;
}

#[async_trait]
pub trait TransferServiceTrait: Send + Sync {
    /// Records the transfer, debits `amount + fee` from the source and credits
    /// `amount` to the destination in one atomic unit.
    async fn create_transfer(&self, new_transfer: NewTransfer) -> Result<Transfer>;

    fn get_transfer(&self, transfer_id: &str) -> Result<Transfer>;

    fn list_transfers(&self, wallet_id: Option<&str>) -> Result<Vec<Transfer>>;
}
