//! Repository trait implementations for [`InMemoryLedger`].

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::cmp::Reverse;

use super::ledger_store::{missing, new_id, timestamp, InMemoryLedger};
use crate::budgets::{Budget, BudgetRepositoryTrait, NewBudget};
use crate::categories::{
    Category, CategoryRepositoryTrait, CategoryType, CategoryUpdate, NewCategory,
};
use crate::errors::{DatabaseError, Error, Result};
use crate::goals::{Goal, GoalContribution, GoalRepositoryTrait, GoalStatus, GoalUpdate, NewGoal};
use crate::recurring::{NewRecurringTransaction, RecurringRepositoryTrait, RecurringTransaction};
use crate::transactions::{
    summarize, summarize_by_category, CategorySummary, ListParams, Transaction,
    TransactionFilter, TransactionRepositoryTrait, TransactionSummary,
};
use crate::transfers::{Transfer, TransferRepositoryTrait};
use crate::wallets::{NewWallet, Wallet, WalletFilter, WalletRepositoryTrait, WalletUpdate};

#[async_trait]
impl WalletRepositoryTrait for InMemoryLedger {
    async fn create(&self, new_wallet: NewWallet) -> Result<Wallet> {
        let now = timestamp();
        let wallet = Wallet {
            id: new_id(new_wallet.id),
            name: new_wallet.name,
            wallet_type: new_wallet.wallet_type,
            balance: new_wallet.initial_balance,
            currency: new_wallet.currency,
            color: new_wallet.color,
            icon: new_wallet.icon,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let mut state = self.state()?;
        if state.wallets.contains_key(&wallet.id) {
            return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                "wallet {} already exists",
                wallet.id
            ))));
        }
        state.wallets.insert(wallet.id.clone(), wallet.clone());
        Ok(wallet)
    }

    async fn update(&self, wallet_update: WalletUpdate) -> Result<Wallet> {
        let mut state = self.state()?;
        let wallet = state
            .wallets
            .get_mut(&wallet_update.id)
            .ok_or_else(|| missing("wallet", &wallet_update.id))?;
        wallet_update.apply_to(wallet);
        wallet.updated_at = timestamp();
        Ok(wallet.clone())
    }

    async fn deactivate(&self, wallet_id: &str) -> Result<()> {
        let mut state = self.state()?;
        match state.wallets.get_mut(wallet_id) {
            Some(wallet) if wallet.is_active => {
                wallet.is_active = false;
                wallet.updated_at = timestamp();
                Ok(())
            }
            _ => Err(missing("active wallet", wallet_id)),
        }
    }

    fn get_by_id(&self, wallet_id: &str) -> Result<Wallet> {
        self.state()?
            .wallets
            .get(wallet_id)
            .cloned()
            .ok_or_else(|| missing("wallet", wallet_id))
    }

    fn list(&self, filter: &WalletFilter) -> Result<Vec<Wallet>> {
        let mut wallets: Vec<Wallet> = self
            .state()?
            .wallets
            .values()
            .filter(|w| filter.matches(w))
            .cloned()
            .collect();
        wallets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(wallets)
    }

    fn get_total_active_balance(&self) -> Result<Decimal> {
        Ok(self
            .state()?
            .wallets
            .values()
            .filter(|w| w.is_active)
            .map(|w| w.balance)
            .sum())
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryLedger {
    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        let now = timestamp();
        let category = Category {
            id: new_id(new_category.id),
            name: new_category.name,
            category_type: new_category.category_type,
            parent_id: new_category.parent_id,
            color: new_category.color,
            icon: new_category.icon,
            sort_order: new_category.sort_order,
            created_at: now,
            updated_at: now,
        };
        self.state()?
            .categories
            .insert(category.id.clone(), category.clone());
        Ok(category)
    }

    async fn update(&self, category_update: CategoryUpdate) -> Result<Category> {
        let mut state = self.state()?;
        let category = state
            .categories
            .get_mut(&category_update.id)
            .ok_or_else(|| missing("category", &category_update.id))?;
        category_update.apply_to(category);
        category.updated_at = timestamp();
        Ok(category.clone())
    }

    async fn delete(&self, category_id: &str) -> Result<()> {
        let mut state = self.state()?;
        if state.categories.remove(category_id).is_none() {
            return Err(missing("category", category_id));
        }
        let orphaned = Some(category_id.to_string());
        for category in state.categories.values_mut() {
            if category.parent_id == orphaned {
                category.parent_id = None;
            }
        }
        for transaction in state.transactions.iter_mut() {
            if transaction.category_id == orphaned {
                transaction.category_id = None;
            }
        }
        for recurring in state.recurring.values_mut() {
            if recurring.category_id == orphaned {
                recurring.category_id = None;
            }
        }
        state.budgets.retain(|_, b| b.category_id != category_id);
        Ok(())
    }

    fn get_by_id(&self, category_id: &str) -> Result<Category> {
        self.state()?
            .categories
            .get(category_id)
            .cloned()
            .ok_or_else(|| missing("category", category_id))
    }

    fn list(&self, category_type: Option<CategoryType>) -> Result<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .state()?
            .categories
            .values()
            .filter(|c| category_type.map_or(true, |t| c.category_type == t))
            .cloned()
            .collect();
        categories.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    fn list_children(&self, parent_id: &str) -> Result<Vec<Category>> {
        let mut children: Vec<Category> = self
            .state()?
            .categories
            .values()
            .filter(|c| c.parent_id.as_deref() == Some(parent_id))
            .cloned()
            .collect();
        children.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(children)
    }
}

impl InMemoryLedger {
    /// Matching transactions, newest business date first; ties keep the most
    /// recently inserted first.
    fn filtered_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let state = self.state()?;
        let mut matching: Vec<Transaction> = state
            .transactions
            .iter()
            .rev()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        matching.sort_by_key(|t| Reverse(t.transaction_date));
        Ok(matching)
    }
}

impl TransactionRepositoryTrait for InMemoryLedger {
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        self.state()?
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| missing("transaction", transaction_id))
    }

    fn list(&self, filter: &TransactionFilter, params: ListParams) -> Result<Vec<Transaction>> {
        let offset = usize::try_from(params.offset).unwrap_or(0);
        let limit = usize::try_from(params.limit).unwrap_or(0);
        Ok(self
            .filtered_transactions(filter)?
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    fn get_summary(&self, filter: &TransactionFilter) -> Result<TransactionSummary> {
        Ok(summarize(&self.filtered_transactions(filter)?))
    }

    fn get_category_summary(&self, filter: &TransactionFilter) -> Result<Vec<CategorySummary>> {
        let transactions = self.filtered_transactions(filter)?;
        let state = self.state()?;
        let rows = transactions.into_iter().map(|t| {
            let name = t
                .category_id
                .as_ref()
                .and_then(|id| state.categories.get(id))
                .map(|c| c.name.clone());
            (t.category_id, name, t.amount)
        });
        Ok(summarize_by_category(rows))
    }
}

impl TransferRepositoryTrait for InMemoryLedger {
    fn get_by_id(&self, transfer_id: &str) -> Result<Transfer> {
        self.state()?
            .transfers
            .iter()
            .find(|t| t.id == transfer_id)
            .cloned()
            .ok_or_else(|| missing("transfer", transfer_id))
    }

    fn list(&self, wallet_id: Option<&str>) -> Result<Vec<Transfer>> {
        let state = self.state()?;
        Ok(state
            .transfers
            .iter()
            .rev()
            .filter(|t| {
                wallet_id.map_or(true, |id| t.from_wallet_id == id || t.to_wallet_id == id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BudgetRepositoryTrait for InMemoryLedger {
    async fn create(&self, new_budget: NewBudget) -> Result<Budget> {
        let now = timestamp();
        let budget = Budget {
            id: new_id(new_budget.id),
            category_id: new_budget.category_id,
            amount: new_budget.amount,
            period: new_budget.period,
            start_date: new_budget.start_date,
            end_date: new_budget.end_date,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.state()?
            .budgets
            .insert(budget.id.clone(), budget.clone());
        Ok(budget)
    }

    async fn update(&self, budget: Budget) -> Result<Budget> {
        let mut state = self.state()?;
        let stored = state
            .budgets
            .get_mut(&budget.id)
            .ok_or_else(|| missing("budget", &budget.id))?;
        stored.amount = budget.amount;
        stored.period = budget.period;
        stored.start_date = budget.start_date;
        stored.end_date = budget.end_date;
        stored.is_active = budget.is_active;
        stored.updated_at = timestamp();
        Ok(stored.clone())
    }

    async fn delete(&self, budget_id: &str) -> Result<()> {
        self.state()?
            .budgets
            .remove(budget_id)
            .map(|_| ())
            .ok_or_else(|| missing("budget", budget_id))
    }

    fn get_by_id(&self, budget_id: &str) -> Result<Budget> {
        self.state()?
            .budgets
            .get(budget_id)
            .cloned()
            .ok_or_else(|| missing("budget", budget_id))
    }

    fn get_by_category(&self, category_id: &str) -> Result<Budget> {
        self.state()?
            .budgets
            .values()
            .filter(|b| b.is_active && b.category_id == category_id)
            .max_by_key(|b| b.start_date)
            .cloned()
            .ok_or_else(|| missing("budget for category", category_id))
    }

    fn list(&self, active_only: bool) -> Result<Vec<Budget>> {
        let mut budgets: Vec<Budget> = self
            .state()?
            .budgets
            .values()
            .filter(|b| !active_only || b.is_active)
            .cloned()
            .collect();
        budgets.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
        Ok(budgets)
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryLedger {
    async fn create(&self, new_goal: NewGoal) -> Result<Goal> {
        let now = timestamp();
        let goal = Goal {
            id: new_id(new_goal.id),
            name: new_goal.name,
            description: new_goal.description,
            target_amount: new_goal.target_amount,
            current_amount: Decimal::ZERO,
            deadline: new_goal.deadline,
            status: GoalStatus::Active,
            color: new_goal.color,
            icon: new_goal.icon,
            created_at: now,
            updated_at: now,
        };
        self.state()?.goals.insert(goal.id.clone(), goal.clone());
        Ok(goal)
    }

    async fn update(&self, goal_update: GoalUpdate) -> Result<Goal> {
        let mut state = self.state()?;
        let goal = state
            .goals
            .get_mut(&goal_update.id)
            .ok_or_else(|| missing("goal", &goal_update.id))?;
        goal_update.apply_to(goal);
        goal.updated_at = timestamp();
        Ok(goal.clone())
    }

    async fn update_status(&self, goal_id: &str, status: GoalStatus) -> Result<Goal> {
        if self.goal_status_updates_fail() {
            return Err(Error::Database(DatabaseError::QueryFailed(format!(
                "injected failure updating status of goal {}",
                goal_id
            ))));
        }
        let mut state = self.state()?;
        let goal = state
            .goals
            .get_mut(goal_id)
            .ok_or_else(|| missing("goal", goal_id))?;
        goal.status = status;
        goal.updated_at = timestamp();
        Ok(goal.clone())
    }

    async fn delete(&self, goal_id: &str) -> Result<()> {
        let mut state = self.state()?;
        if state.goals.remove(goal_id).is_none() {
            return Err(missing("goal", goal_id));
        }
        state.contributions.retain(|c| c.goal_id != goal_id);
        Ok(())
    }

    fn get_by_id(&self, goal_id: &str) -> Result<Goal> {
        self.state()?
            .goals
            .get(goal_id)
            .cloned()
            .ok_or_else(|| missing("goal", goal_id))
    }

    fn list(&self, status: Option<GoalStatus>) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .state()?
            .goals
            .values()
            .filter(|g| status.map_or(true, |s| g.status == s))
            .cloned()
            .collect();
        goals.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(goals)
    }

    fn get_contributions(&self, goal_id: &str) -> Result<Vec<GoalContribution>> {
        Ok(self
            .state()?
            .contributions
            .iter()
            .rev()
            .filter(|c| c.goal_id == goal_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RecurringRepositoryTrait for InMemoryLedger {
    async fn create(&self, new_recurring: NewRecurringTransaction) -> Result<RecurringTransaction> {
        let now = timestamp();
        let recurring = RecurringTransaction {
            id: new_id(new_recurring.id),
            wallet_id: new_recurring.wallet_id,
            category_id: new_recurring.category_id,
            transaction_type: new_recurring.transaction_type,
            amount: new_recurring.amount,
            description: new_recurring.description,
            frequency: new_recurring.frequency,
            next_due: new_recurring.next_due,
            anchor_day: new_recurring.next_due.day(),
            end_date: new_recurring.end_date,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let mut state = self.state()?;
        if !state.wallets.contains_key(&recurring.wallet_id) {
            return Err(Error::Database(DatabaseError::ForeignKeyViolation(format!(
                "wallet {} does not exist",
                recurring.wallet_id
            ))));
        }
        state
            .recurring
            .insert(recurring.id.clone(), recurring.clone());
        Ok(recurring)
    }

    async fn update(&self, recurring: RecurringTransaction) -> Result<RecurringTransaction> {
        if self.recurring_update_fails(&recurring.id)? {
            return Err(Error::Database(DatabaseError::QueryFailed(format!(
                "injected failure updating recurring {}",
                recurring.id
            ))));
        }
        let mut state = self.state()?;
        let stored = state
            .recurring
            .get_mut(&recurring.id)
            .ok_or_else(|| missing("recurring transaction", &recurring.id))?;
        let created_at = stored.created_at;
        *stored = RecurringTransaction {
            created_at,
            updated_at: timestamp(),
            ..recurring
        };
        Ok(stored.clone())
    }

    async fn delete(&self, recurring_id: &str) -> Result<()> {
        self.state()?
            .recurring
            .remove(recurring_id)
            .map(|_| ())
            .ok_or_else(|| missing("recurring transaction", recurring_id))
    }

    fn get_by_id(&self, recurring_id: &str) -> Result<RecurringTransaction> {
        self.state()?
            .recurring
            .get(recurring_id)
            .cloned()
            .ok_or_else(|| missing("recurring transaction", recurring_id))
    }

    fn list(&self, active_only: bool) -> Result<Vec<RecurringTransaction>> {
        let mut items: Vec<RecurringTransaction> = self
            .state()?
            .recurring
            .values()
            .filter(|r| !active_only || r.is_active)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.next_due.cmp(&b.next_due).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    fn get_due(&self, as_of: NaiveDate) -> Result<Vec<RecurringTransaction>> {
        let mut due: Vec<RecurringTransaction> = self
            .state()?
            .recurring
            .values()
            .filter(|r| r.is_due(as_of))
            .cloned()
            .collect();
        due.sort_by(|a, b| a.next_due.cmp(&b.next_due).then_with(|| a.id.cmp(&b.id)));
        Ok(due)
    }
}
