use log::debug;
use std::sync::Arc;

use super::budgets_model::{Budget, BudgetStatus, BudgetUpdate, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Result, ResultExt};
use crate::transactions::TransactionRepositoryTrait;

/// Service for budgets and spending status
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            category_repository,
            transaction_repository,
        }
    }

    fn status_for(&self, budget: Budget) -> Result<BudgetStatus> {
        let summary = self
            .transaction_repository
            .get_summary(&budget.spending_filter())
            .context("Failed to compute budget spending")?;
        // A missing category only blanks the label; the figures are still valid.
        let category = match self.category_repository.get_by_id(&budget.category_id) {
            Ok(category) => Some(category),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e).context("Failed to load budget category"),
        };
        Ok(BudgetStatus::compute(
            budget,
            category.as_ref(),
            summary.total_expense,
        ))
    }
}

#[async_trait::async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        self.category_repository
            .get_by_id(&new_budget.category_id)
            .context("Category not found")?;
        debug!(
            "Creating {} budget of {} for category {}",
            new_budget.period, new_budget.amount, new_budget.category_id
        );
        self.repository.create(new_budget).await
    }

    async fn update_budget(&self, budget_update: BudgetUpdate) -> Result<Budget> {
        let mut budget = self.repository.get_by_id(&budget_update.id)?;
        budget_update.apply_to(&mut budget);
        budget.validate()?;
        self.repository.update(budget).await
    }

    async fn delete_budget(&self, budget_id: &str) -> Result<()> {
        self.repository.delete(budget_id).await
    }

    fn get_budget(&self, budget_id: &str) -> Result<Budget> {
        self.repository.get_by_id(budget_id)
    }

    fn get_budget_by_category(&self, category_id: &str) -> Result<Budget> {
        self.repository.get_by_category(category_id)
    }

    fn list_budgets(&self, active_only: bool) -> Result<Vec<Budget>> {
        self.repository.list(active_only)
    }

    fn get_status(&self, budget_id: &str) -> Result<BudgetStatus> {
        let budget = self.repository.get_by_id(budget_id)?;
        self.status_for(budget)
    }

    fn get_all_status(&self) -> Result<Vec<BudgetStatus>> {
        self.repository
            .list(true)?
            .into_iter()
            .map(|budget| self.status_for(budget))
            .collect()
    }
}
