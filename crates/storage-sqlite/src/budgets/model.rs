//! Database models for budgets.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use dompet_core::budgets::{Budget, NewBudget};
use dompet_core::errors::{Error, Result};

use crate::utils::{parse_decimal, parse_label};

/// Database model for budgets
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub category_id: String,
    pub amount: String,
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl BudgetDB {
    pub fn from_new(new_budget: NewBudget, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            category_id: new_budget.category_id,
            amount: new_budget.amount.to_string(),
            period: new_budget.period.as_str().to_string(),
            start_date: new_budget.start_date,
            end_date: new_budget.end_date,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<BudgetDB> for Budget {
    type Error = Error;

    fn try_from(db: BudgetDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "budgets.amount")?,
            period: parse_label(&db.period, "budgets.period")?,
            id: db.id,
            category_id: db.category_id,
            start_date: db.start_date,
            end_date: db.end_date,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Budget> for BudgetDB {
    fn from(domain: Budget) -> Self {
        Self {
            id: domain.id,
            category_id: domain.category_id,
            amount: domain.amount.to_string(),
            period: domain.period.as_str().to_string(),
            start_date: domain.start_date,
            end_date: domain.end_date,
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
