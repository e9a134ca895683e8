//! SQLite storage implementation for recurring transaction templates.

mod model;
mod repository;

pub use model::RecurringTransactionDB;
pub use repository::RecurringRepository;
