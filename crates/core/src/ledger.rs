//! Explicit composition of the ledger services.
//!
//! Storage backends hand over their repositories and unit of work; this module
//! wires them into fully constructed services. Nothing is global.

use std::sync::Arc;

use crate::budgets::{BudgetRepositoryTrait, BudgetService, BudgetServiceTrait};
use crate::categories::{CategoryRepositoryTrait, CategoryService, CategoryServiceTrait};
use crate::config::LedgerConfig;
use crate::errors::Result;
use crate::goals::{GoalRepositoryTrait, GoalService, GoalServiceTrait};
use crate::recurring::{RecurringRepositoryTrait, RecurringService, RecurringServiceTrait};
use crate::transactions::{
    TransactionRepositoryTrait, TransactionService, TransactionServiceTrait,
};
use crate::transfers::{TransferRepositoryTrait, TransferService, TransferServiceTrait};
use crate::unit_of_work::UnitOfWork;
use crate::wallets::{WalletRepositoryTrait, WalletService, WalletServiceTrait};

/// Repository handles provided by a storage backend.
#[derive(Clone)]
pub struct LedgerRepositories {
    pub wallets: Arc<dyn WalletRepositoryTrait>,
    pub categories: Arc<dyn CategoryRepositoryTrait>,
    pub transactions: Arc<dyn TransactionRepositoryTrait>,
    pub transfers: Arc<dyn TransferRepositoryTrait>,
    pub budgets: Arc<dyn BudgetRepositoryTrait>,
    pub goals: Arc<dyn GoalRepositoryTrait>,
    pub recurring: Arc<dyn RecurringRepositoryTrait>,
}

/// Every service of the ledger, ready to use.
#[derive(Clone)]
pub struct LedgerServices {
    pub wallet_service: Arc<dyn WalletServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub transfer_service: Arc<dyn TransferServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub recurring_service: Arc<dyn RecurringServiceTrait>,
}

impl LedgerServices {
    pub fn new<U>(
        repositories: LedgerRepositories,
        unit_of_work: U,
        config: &LedgerConfig,
    ) -> Result<Self>
    where
        U: UnitOfWork + Clone + 'static,
    {
        config.validate()?;

        let transaction_service: Arc<dyn TransactionServiceTrait> = Arc::new(
            TransactionService::new(repositories.transactions.clone(), unit_of_work.clone()),
        );

        Ok(Self {
            wallet_service: Arc::new(WalletService::new(
                repositories.wallets.clone(),
                config.default_currency.clone(),
            )),
            category_service: Arc::new(CategoryService::new(repositories.categories.clone())),
            transfer_service: Arc::new(TransferService::new(
                repositories.transfers.clone(),
                unit_of_work.clone(),
            )),
            budget_service: Arc::new(BudgetService::new(
                repositories.budgets.clone(),
                repositories.categories.clone(),
                repositories.transactions.clone(),
            )),
            goal_service: Arc::new(GoalService::new(repositories.goals.clone(), unit_of_work)),
            recurring_service: Arc::new(RecurringService::new(
                repositories.recurring.clone(),
                repositories.wallets.clone(),
                transaction_service.clone(),
            )),
            transaction_service,
        })
    }
}
