//! Budget domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::transactions::{TransactionFilter, TransactionType};
use crate::utils::validation::{validate_positive, validate_required_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(BudgetPeriod::Weekly),
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(Error::invalid_input(format!(
                "Invalid budget period '{}': must be weekly, monthly or yearly",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    /// `None` means the budget runs indefinitely.
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Budget {
    pub fn validate(&self) -> Result<()> {
        validate_required_id("categoryId", &self.category_id)?;
        validate_positive("amount", self.amount)?;
        validate_period_dates(self.start_date, self.end_date)
    }

    /// Expense transactions counted against this budget.
    pub fn spending_filter(&self) -> TransactionFilter {
        TransactionFilter {
            category_id: Some(self.category_id.clone()),
            transaction_type: Some(TransactionType::Expense),
            start_date: Some(self.start_date),
            end_date: self.end_date,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category_id: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        validate_required_id("categoryId", &self.category_id)?;
        validate_positive("amount", self.amount)?;
        validate_period_dates(self.start_date, self.end_date)
    }
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub id: String,
    pub amount: Option<Decimal>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl BudgetUpdate {
    pub fn apply_to(&self, budget: &mut Budget) {
        if let Some(amount) = self.amount {
            budget.amount = amount;
        }
        if self.end_date.is_some() {
            budget.end_date = self.end_date;
        }
        if let Some(is_active) = self.is_active {
            budget.is_active = is_active;
        }
    }
}

fn validate_period_dates(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Result<()> {
    match end_date {
        Some(end) if end < start_date => Err(Error::invalid_input(
            "End date cannot be before start date",
        )),
        _ => Ok(()),
    }
}

/// Live status of a budget against the expenses recorded in its period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub budget: Budget,
    pub category_name: String,
    pub category_icon: Option<String>,
    pub spent: Decimal,
    pub remaining: Decimal,
    /// Percentage of the limit used; may exceed 100.
    pub progress_percent: Decimal,
    pub is_over_budget: bool,
}

impl BudgetStatus {
    pub fn compute(budget: Budget, category: Option<&Category>, spent: Decimal) -> Self {
        let remaining = (budget.amount - spent).max(Decimal::ZERO);
        let progress_percent = if budget.amount.is_zero() {
            Decimal::ZERO
        } else {
            (spent / budget.amount * Decimal::ONE_HUNDRED).round_dp(DISPLAY_DECIMAL_PRECISION)
        };
        Self {
            category_name: category.map(|c| c.name.clone()).unwrap_or_default(),
            category_icon: category.and_then(|c| c.icon.clone()),
            spent,
            remaining,
            progress_percent,
            is_over_budget: spent > budget.amount,
            budget,
        }
    }
}
