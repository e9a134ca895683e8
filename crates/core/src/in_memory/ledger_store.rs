use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::budgets::Budget;
use crate::categories::Category;
use crate::errors::{DatabaseError, Error, Result};
use crate::goals::{Goal, GoalContribution, NewGoalContribution};
use crate::ledger::LedgerRepositories;
use crate::recurring::RecurringTransaction;
use crate::transactions::{NewTransaction, Transaction};
use crate::transfers::{NewTransfer, Transfer};
use crate::unit_of_work::{LedgerScope, UnitOfWork};
use crate::utils::time_utils;
use crate::wallets::Wallet;

/// Whole-ledger state. Rows that are listed newest-first keep insertion order.
#[derive(Debug, Clone, Default)]
pub(super) struct LedgerState {
    pub wallets: HashMap<String, Wallet>,
    pub categories: HashMap<String, Category>,
    pub transactions: Vec<Transaction>,
    pub transfers: Vec<Transfer>,
    pub budgets: HashMap<String, Budget>,
    pub goals: HashMap<String, Goal>,
    pub contributions: Vec<GoalContribution>,
    pub recurring: HashMap<String, RecurringTransaction>,
}

#[derive(Debug, Default)]
struct FaultPlan {
    fail_balance_updates: AtomicBool,
    fail_goal_status_updates: AtomicBool,
    fail_recurring_updates: Mutex<HashSet<String>>,
}

/// In-memory ledger store shared by all repository handles cloned from it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    state: Arc<Mutex<LedgerState>>,
    faults: Arc<FaultPlan>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository handles backed by this store.
    pub fn repositories(&self) -> LedgerRepositories {
        let store = Arc::new(self.clone());
        LedgerRepositories {
            wallets: store.clone(),
            categories: store.clone(),
            transactions: store.clone(),
            transfers: store.clone(),
            budgets: store.clone(),
            goals: store.clone(),
            recurring: store,
        }
    }

    /// Makes every subsequent wallet balance write fail.
    #[cfg(any(test, feature = "test-util"))]
    pub fn fail_balance_updates(&self, fail: bool) {
        self.faults
            .fail_balance_updates
            .store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent goal status change fail.
    #[cfg(any(test, feature = "test-util"))]
    pub fn fail_goal_status_updates(&self, fail: bool) {
        self.faults
            .fail_goal_status_updates
            .store(fail, Ordering::SeqCst);
    }

    /// Makes updates of one recurring template fail.
    #[cfg(any(test, feature = "test-util"))]
    pub fn fail_recurring_update(&self, recurring_id: &str) -> Result<()> {
        self.faults
            .fail_recurring_updates
            .lock()
            .map_err(|_| poisoned())?
            .insert(recurring_id.to_string());
        Ok(())
    }

    pub(super) fn state(&self) -> Result<MutexGuard<'_, LedgerState>> {
        self.state.lock().map_err(|_| poisoned())
    }

    pub(super) fn goal_status_updates_fail(&self) -> bool {
        self.faults.fail_goal_status_updates.load(Ordering::SeqCst)
    }

    pub(super) fn recurring_update_fails(&self, recurring_id: &str) -> Result<bool> {
        Ok(self
            .faults
            .fail_recurring_updates
            .lock()
            .map_err(|_| poisoned())?
            .contains(recurring_id))
    }
}

fn poisoned() -> Error {
    Error::Database(DatabaseError::Internal(
        "in-memory ledger lock poisoned".to_string(),
    ))
}

pub(super) fn new_id(id: Option<String>) -> String {
    id.unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub(super) fn timestamp() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub(super) fn missing(entity: &str, id: &str) -> Error {
    Error::not_found(format!("{} {}", entity, id))
}

fn foreign_key(message: String) -> Error {
    Error::Database(DatabaseError::ForeignKeyViolation(message))
}

/// Scope handed to atomic closures; writes land in the draft state only.
struct DraftScope<'a> {
    draft: &'a mut LedgerState,
    faults: &'a FaultPlan,
}

impl LedgerScope for DraftScope<'_> {
    fn get_wallet(&mut self, wallet_id: &str) -> Result<Wallet> {
        self.draft
            .wallets
            .get(wallet_id)
            .cloned()
            .ok_or_else(|| missing("wallet", wallet_id))
    }

    fn update_wallet_balance(&mut self, wallet_id: &str, new_balance: Decimal) -> Result<()> {
        if self.faults.fail_balance_updates.load(Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::QueryFailed(format!(
                "injected failure updating balance of wallet {}",
                wallet_id
            ))));
        }
        let wallet = self
            .draft
            .wallets
            .get_mut(wallet_id)
            .ok_or_else(|| missing("wallet", wallet_id))?;
        wallet.balance = new_balance;
        wallet.updated_at = timestamp();
        Ok(())
    }

    fn insert_transaction(&mut self, new_transaction: NewTransaction) -> Result<Transaction> {
        if !self.draft.wallets.contains_key(&new_transaction.wallet_id) {
            return Err(foreign_key(format!(
                "wallet {} does not exist",
                new_transaction.wallet_id
            )));
        }
        if let Some(category_id) = &new_transaction.category_id {
            if !self.draft.categories.contains_key(category_id) {
                return Err(foreign_key(format!(
                    "category {} does not exist",
                    category_id
                )));
            }
        }
        let now = timestamp();
        let transaction = Transaction {
            id: new_id(new_transaction.id),
            wallet_id: new_transaction.wallet_id,
            category_id: new_transaction.category_id,
            transaction_type: new_transaction.transaction_type,
            amount: new_transaction.amount,
            description: new_transaction.description,
            tags: new_transaction.tags,
            transaction_date: new_transaction
                .transaction_date
                .unwrap_or_else(time_utils::now),
            created_at: now,
            updated_at: now,
        };
        if self.draft.transactions.iter().any(|t| t.id == transaction.id) {
            return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                "transaction {} already exists",
                transaction.id
            ))));
        }
        self.draft.transactions.push(transaction.clone());
        Ok(transaction)
    }

    fn get_transaction(&mut self, transaction_id: &str) -> Result<Transaction> {
        self.draft
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| missing("transaction", transaction_id))
    }

    fn delete_transaction(&mut self, transaction_id: &str) -> Result<()> {
        let before = self.draft.transactions.len();
        self.draft.transactions.retain(|t| t.id != transaction_id);
        if self.draft.transactions.len() == before {
            return Err(missing("transaction", transaction_id));
        }
        Ok(())
    }

    fn insert_transfer(&mut self, new_transfer: NewTransfer) -> Result<Transfer> {
        for wallet_id in [&new_transfer.from_wallet_id, &new_transfer.to_wallet_id] {
            if !self.draft.wallets.contains_key(wallet_id) {
                return Err(foreign_key(format!("wallet {} does not exist", wallet_id)));
            }
        }
        let transfer = Transfer {
            id: new_id(new_transfer.id),
            from_wallet_id: new_transfer.from_wallet_id,
            to_wallet_id: new_transfer.to_wallet_id,
            amount: new_transfer.amount,
            fee: new_transfer.fee,
            note: new_transfer.note,
            created_at: timestamp(),
        };
        self.draft.transfers.push(transfer.clone());
        Ok(transfer)
    }

    fn get_goal(&mut self, goal_id: &str) -> Result<Goal> {
        self.draft
            .goals
            .get(goal_id)
            .cloned()
            .ok_or_else(|| missing("goal", goal_id))
    }

    fn add_goal_contribution(
        &mut self,
        contribution: NewGoalContribution,
    ) -> Result<GoalContribution> {
        let goal = self
            .draft
            .goals
            .get_mut(&contribution.goal_id)
            .ok_or_else(|| missing("goal", &contribution.goal_id))?;
        let now = timestamp();
        goal.current_amount += contribution.amount;
        goal.updated_at = now;

        let contribution = GoalContribution {
            id: new_id(contribution.id),
            goal_id: contribution.goal_id,
            amount: contribution.amount,
            note: contribution.note,
            created_at: now,
        };
        self.draft.contributions.push(contribution.clone());
        Ok(contribution)
    }
}

#[async_trait]
impl UnitOfWork for InMemoryLedger {
    async fn run_atomic<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerScope) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        // The lock is held for the whole unit, so units never interleave.
        let mut state = self.state()?;
        let mut draft = state.clone();
        let mut scope = DraftScope {
            draft: &mut draft,
            faults: &self.faults,
        };
        match job(&mut scope) {
            Ok(value) => {
                *state = draft;
                Ok(value)
            }
            Err(e) => {
                debug!("Atomic unit rolled back: {}", e);
                Err(e)
            }
        }
    }
}
