//! Transfers module - atomic moves between two wallets.

mod transfers_model;
mod transfers_service;
mod transfers_traits;


pub use transfers_model::{NewTransfer, Transfer};
pub use transfers_service::TransferService;
pub use transfers_traits::{TransferRepositoryTrait, TransferServiceTrait};
