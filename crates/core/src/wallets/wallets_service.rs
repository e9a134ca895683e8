use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::wallets_model::{NewWallet, Wallet, WalletFilter, WalletUpdate};
use super::wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
use crate::errors::Result;

/// Service for managing wallets
pub struct WalletService {
    repository: Arc<dyn WalletRepositoryTrait>,
    default_currency: String,
}

impl WalletService {
    pub fn new(repository: Arc<dyn WalletRepositoryTrait>, default_currency: String) -> Self {
        Self {
            repository,
            default_currency,
        }
    }
}

#[async_trait::async_trait]
impl WalletServiceTrait for WalletService {
    async fn create_wallet(&self, new_wallet: NewWallet) -> Result<Wallet> {
        let new_wallet = new_wallet.normalized(&self.default_currency);
        new_wallet.validate()?;
        debug!(
            "Creating wallet '{}' ({}, {})",
            new_wallet.name, new_wallet.wallet_type, new_wallet.currency
        );
        self.repository.create(new_wallet).await
    }

    async fn update_wallet(&self, wallet_update: WalletUpdate) -> Result<Wallet> {
        wallet_update.validate()?;
        self.repository.update(wallet_update).await
    }

    async fn delete_wallet(&self, wallet_id: &str) -> Result<()> {
        debug!("Deactivating wallet {}", wallet_id);
        self.repository.deactivate(wallet_id).await
    }

    fn get_wallet(&self, wallet_id: &str) -> Result<Wallet> {
        self.repository.get_by_id(wallet_id)
    }

    fn list_wallets(&self, filter: &WalletFilter) -> Result<Vec<Wallet>> {
        self.repository.list(filter)
    }

    fn get_total_balance(&self) -> Result<Decimal> {
        self.repository.get_total_active_balance()
    }
}
