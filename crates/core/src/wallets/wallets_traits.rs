//! Wallet repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::wallets_model::{NewWallet, Wallet, WalletFilter, WalletUpdate};
use crate::errors::Result;

/// Trait defining the contract for Wallet repository operations.
///
/// Balance writes are not part of this trait: they only happen through
/// [`crate::unit_of_work::LedgerScope`] so they always share an atomic unit
/// with the ledger row that justifies them.
#[async_trait]
pub trait WalletRepositoryTrait: Send + Sync {
    /// Inserts a new active wallet whose balance is the initial balance.
    async fn create(&self, new_wallet: NewWallet) -> Result<Wallet>;

    /// Updates the cosmetic fields of a wallet.
    async fn update(&self, wallet_update: WalletUpdate) -> Result<Wallet>;

    /// Soft-deletes a wallet.
    ///
    /// Returns `NotFound` if the wallet does not exist or is already inactive.
    async fn deactivate(&self, wallet_id: &str) -> Result<()>;

    fn get_by_id(&self, wallet_id: &str) -> Result<Wallet>;

    /// Lists wallets matching the filter, ordered by name.
    fn list(&self, filter: &WalletFilter) -> Result<Vec<Wallet>>;

    /// Sum of balances over active wallets.
    fn get_total_active_balance(&self) -> Result<Decimal>;
}

/// Trait defining the contract for Wallet service operations.
#[async_trait]
pub trait WalletServiceTrait: Send + Sync {
    async fn create_wallet(&self, new_wallet: NewWallet) -> Result<Wallet>;

    async fn update_wallet(&self, wallet_update: WalletUpdate) -> Result<Wallet>;

    /// Soft-deletes the wallet; its history stays intact.
    async fn delete_wallet(&self, wallet_id: &str) -> Result<()>;

    fn get_wallet(&self, wallet_id: &str) -> Result<Wallet>;

    fn list_wallets(&self, filter: &WalletFilter) -> Result<Vec<Wallet>>;

    fn get_total_balance(&self) -> Result<Decimal>;
}
