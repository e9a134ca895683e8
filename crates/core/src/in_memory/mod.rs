//! Map-backed implementation of every storage contract.
//!
//! [`InMemoryLedger`] satisfies the same repository traits and [`UnitOfWork`]
//! contract as the SQLite backend. Atomic units run against a draft copy of
//! the state that replaces the live state only when the closure succeeds.
//! Failure injection hooks, compiled for tests and the `test-util` feature,
//! let tests force a write to fail mid-unit.

mod ledger_store;
mod repositories;

pub use ledger_store::InMemoryLedger;
