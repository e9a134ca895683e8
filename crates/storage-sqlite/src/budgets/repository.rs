use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use dompet_core::budgets::{Budget, BudgetRepositoryTrait, NewBudget};
use dompet_core::errors::Result;

use super::model::BudgetDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{not_found_as, StorageError};
use crate::schema::budgets;

pub struct BudgetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BudgetRepository { pool, writer }
    }
}

fn into_budgets(rows: Vec<BudgetDB>) -> Result<Vec<Budget>> {
    rows.into_iter().map(Budget::try_from).collect()
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    async fn create(&self, new_budget: NewBudget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let id = new_budget
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = BudgetDB::from_new(new_budget, id, Utc::now().naive_utc());
                let inserted = diesel::insert_into(budgets::table)
                    .values(&row)
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Budget::try_from(inserted)
            })
            .await
    }

    async fn update(&self, budget: Budget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let budget_id = budget.id.clone();
                let mut row = BudgetDB::from(budget);
                row.updated_at = Utc::now().naive_utc();
                // category and creation time are fixed once the budget exists
                let saved = diesel::update(budgets::table.find(&budget_id))
                    .set((
                        budgets::amount.eq(&row.amount),
                        budgets::period.eq(&row.period),
                        budgets::start_date.eq(row.start_date),
                        budgets::end_date.eq(row.end_date),
                        budgets::is_active.eq(row.is_active),
                        budgets::updated_at.eq(row.updated_at),
                    ))
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .map_err(not_found_as("budget", &budget_id))?;
                Budget::try_from(saved)
            })
            .await
    }

    async fn delete(&self, budget_id: &str) -> Result<()> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(budgets::table.find(&budget_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(dompet_core::Error::not_found(format!("budget {}", budget_id)));
                }
                Ok(())
            })
            .await
    }

    fn get_by_id(&self, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .find(budget_id)
            .first::<BudgetDB>(&mut conn)
            .map_err(not_found_as("budget", budget_id))?;
        Budget::try_from(row)
    }

    fn get_by_category(&self, category_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .filter(budgets::category_id.eq(category_id))
            .filter(budgets::is_active.eq(true))
            .order((budgets::start_date.desc(), budgets::created_at.desc()))
            .first::<BudgetDB>(&mut conn)
            .map_err(not_found_as("budget for category", category_id))?;
        Budget::try_from(row)
    }

    fn list(&self, active_only: bool) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = budgets::table.into_boxed();
        if active_only {
            query = query.filter(budgets::is_active.eq(true));
        }
        let rows = query
            .order((budgets::start_date.asc(), budgets::id.asc()))
            .load::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_budgets(rows)
    }
}
