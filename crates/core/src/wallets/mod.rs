//! Wallets module - monetary accounts whose balance is the ledger's source of truth.

mod wallets_model;
mod wallets_service;
mod wallets_traits;

#[cfg(test)]
mod wallets_model_tests;
#[cfg(test)]
mod wallets_service_tests;

pub use wallets_model::{NewWallet, Wallet, WalletFilter, WalletType, WalletUpdate};
pub use wallets_service::WalletService;
pub use wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
