//! SQLite storage implementation for the dompet ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits and the unit of work defined in `dompet-core`:
//! - Database connection pooling and the single writer actor
//! - Diesel migrations
//! - Repository implementations for every ledger entity
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//! `dompet-core` is database-agnostic and works with traits.
//!
//! ```text
//!   core (domain, services)
//!            │
//!            ▼
//!   storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod storage;
pub mod unit_of_work;
mod utils;

// Repository implementations
pub mod budgets;
pub mod categories;
pub mod goals;
pub mod recurring;
pub mod transactions;
pub mod transfers;
pub mod wallets;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use storage::SqliteStorage;
pub use unit_of_work::SqliteUnitOfWork;

// Re-export from dompet-core for convenience
pub use dompet_core::errors::{DatabaseError, Error, Result};
