//! SQLite storage implementation for wallet-to-wallet transfers.

mod model;
mod repository;

pub use model::TransferDB;
pub use repository::TransferRepository;
pub(crate) use repository::insert_transfer;
