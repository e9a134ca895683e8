//! dompet core - domain entities, services, and storage contracts.
//!
//! This crate contains the business logic of the ledger: validation, the
//! money-moving services and budget aggregation. It is database-agnostic and
//! defines traits that are implemented by the `storage-sqlite` crate and by the
//! bundled [`in_memory`] backend.

pub mod budgets;
pub mod categories;
pub mod config;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod in_memory;
pub mod ledger;
pub mod recurring;
pub mod transactions;
pub mod transfers;
pub mod unit_of_work;
pub mod utils;
pub mod wallets;

pub use config::LedgerConfig;
pub use ledger::{LedgerRepositories, LedgerServices};
pub use unit_of_work::{LedgerScope, UnitOfWork};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
