//! Recurring transaction templates.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::transactions::{NewTransaction, TransactionType};
use crate::utils::time_utils;
use crate::utils::validation::{trim_optional, validate_positive, validate_required_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// The date one period after `date`.
    ///
    /// Month and year steps land on `anchor_day` of the target month, or on its
    /// last day when the month is shorter. A schedule anchored on the 31st goes
    /// Jan 31, Feb 28, Mar 31.
    pub fn advance(&self, date: NaiveDate, anchor_day: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => date.checked_add_days(Days::new(1)),
            Frequency::Weekly => date.checked_add_days(Days::new(7)),
            Frequency::Monthly => time_utils::add_months(date, 1)
                .and_then(|d| time_utils::on_day_or_month_end(d, anchor_day)),
            Frequency::Yearly => time_utils::add_years(date, 1)
                .and_then(|d| time_utils::on_day_or_month_end(d, anchor_day)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(Error::invalid_input(format!(
                "Invalid frequency '{}': must be daily, weekly, monthly or yearly",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    pub id: String,
    pub wallet_id: String,
    pub category_id: Option<String>,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub frequency: Frequency,
    pub next_due: NaiveDate,
    /// Day of month the schedule was set up on. Month and year steps return
    /// to it after passing through shorter months.
    pub anchor_day: u32,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl RecurringTransaction {
    pub fn is_due(&self, as_of: NaiveDate) -> bool {
        self.is_active && self.next_due <= as_of
    }

    /// Moves `next_due` forward one period and deactivates the template once
    /// it runs past `end_date`.
    pub fn advance_next_due(&mut self) -> Result<()> {
        self.next_due = self
            .frequency
            .advance(self.next_due, self.anchor_day)
            .ok_or_else(|| {
            Error::Unexpected(format!(
                "Next due date overflow for recurring transaction {}",
                self.id
            ))
        })?;
        if let Some(end_date) = self.end_date {
            if self.next_due > end_date {
                self.is_active = false;
            }
        }
        Ok(())
    }

    /// The transaction this template generates for its current due date.
    pub fn to_new_transaction(&self) -> NewTransaction {
        NewTransaction {
            id: None,
            wallet_id: self.wallet_id.clone(),
            category_id: self.category_id.clone(),
            transaction_type: self.transaction_type,
            amount: self.amount,
            description: self.description.clone(),
            tags: Vec::new(),
            transaction_date: Some(time_utils::start_of_day(self.next_due)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_required_id("walletId", &self.wallet_id)?;
        validate_positive("amount", self.amount)?;
        if !(1..=31).contains(&self.anchor_day) {
            return Err(Error::invalid_input(format!(
                "Invalid anchor day {}: must be between 1 and 31",
                self.anchor_day
            )));
        }
        validate_end_date(self.next_due, self.end_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurringTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub wallet_id: String,
    pub category_id: Option<String>,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub frequency: Frequency,
    pub next_due: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl NewRecurringTransaction {
    pub fn normalized(mut self) -> Self {
        self.wallet_id = self.wallet_id.trim().to_string();
        self.category_id = trim_optional(self.category_id);
        self.description = self.description.trim().to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_required_id("walletId", &self.wallet_id)?;
        validate_positive("amount", self.amount)?;
        validate_end_date(self.next_due, self.end_date)
    }
}

fn validate_end_date(next_due: NaiveDate, end_date: Option<NaiveDate>) -> Result<()> {
    match end_date {
        Some(end) if end < next_due => Err(Error::invalid_input(
            "End date cannot be before the next due date",
        )),
        _ => Ok(()),
    }
}
