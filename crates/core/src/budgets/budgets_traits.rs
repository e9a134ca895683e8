//! Budget repository and service traits.

use async_trait::async_trait;

use super::budgets_model::{Budget, BudgetStatus, BudgetUpdate, NewBudget};
use crate::errors::Result;

#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    async fn create(&self, new_budget: NewBudget) -> Result<Budget>;

    /// Overwrites the mutable fields of an existing budget.
    async fn update(&self, budget: Budget) -> Result<Budget>;

    async fn delete(&self, budget_id: &str) -> Result<()>;

    fn get_by_id(&self, budget_id: &str) -> Result<Budget>;

    /// The most recent active budget for a category.
    fn get_by_category(&self, category_id: &str) -> Result<Budget>;

    fn list(&self, active_only: bool) -> Result<Vec<Budget>>;
}

#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Creates a budget for an existing category.
    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget>;

    async fn update_budget(&self, budget_update: BudgetUpdate) -> Result<Budget>;

    async fn delete_budget(&self, budget_id: &str) -> Result<()>;

    fn get_budget(&self, budget_id: &str) -> Result<Budget>;

    fn get_budget_by_category(&self, category_id: &str) -> Result<Budget>;

    fn list_budgets(&self, active_only: bool) -> Result<Vec<Budget>>;

    fn get_status(&self, budget_id: &str) -> Result<BudgetStatus>;

    /// Status of every active budget.
    fn get_all_status(&self) -> Result<Vec<BudgetStatus>>;
}
