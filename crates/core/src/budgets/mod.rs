//! Budgets module - spending limits per category and their live status.

mod budgets_model;
mod budgets_service;
mod budgets_traits;


pub use budgets_model::{Budget, BudgetPeriod, BudgetStatus, BudgetUpdate, NewBudget};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
