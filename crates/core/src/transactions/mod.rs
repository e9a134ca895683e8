//! Transactions module - income and expense ledger entries.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

#[cfg(test)]
mod transactions_service_tests;

pub use transactions_model::{
    normalize_tags, summarize, summarize_by_category, CategorySummary, ListParams, NewTransaction,
    Transaction, TransactionFilter, TransactionSummary, TransactionType,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
