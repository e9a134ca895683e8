//! Recurring module - templates that periodically generate transactions.

mod recurring_model;
mod recurring_service;
mod recurring_traits;

#[cfg(test)]
mod recurring_service_tests;

pub use recurring_model::{Frequency, NewRecurringTransaction, RecurringTransaction};
pub use recurring_service::RecurringService;
pub use recurring_traits::{RecurringRepositoryTrait, RecurringServiceTrait};
