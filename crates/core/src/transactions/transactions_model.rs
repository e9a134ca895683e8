//! Transaction domain models and the pure aggregation helpers shared by all backends.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LIST_LIMIT, DISPLAY_DECIMAL_PRECISION, MAX_LIST_LIMIT, UNCATEGORIZED_LABEL,
};
use crate::errors::{Error, Result};
use crate::utils::validation::{trim_optional, validate_positive, validate_required_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::invalid_input(format!(
                "Invalid transaction type '{}': must be income or expense",
                other
            ))),
        }
    }
}

/// A single income or expense entry against one wallet.
///
/// `amount` is always positive; the direction comes from `transaction_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub wallet_id: String,
    pub category_id: Option<String>,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub tags: Vec<String>,
    pub transaction_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    /// Signed change this entry applied to its wallet's balance.
    pub fn balance_effect(&self) -> Decimal {
        balance_effect(self.transaction_type, self.amount)
    }
}

pub(crate) fn balance_effect(transaction_type: TransactionType, amount: Decimal) -> Decimal {
    match transaction_type {
        TransactionType::Income => amount,
        TransactionType::Expense => -amount,
    }
}

/// Input model for posting a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub wallet_id: String,
    pub category_id: Option<String>,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Business date; defaults to now when absent.
    pub transaction_date: Option<NaiveDateTime>,
}

impl NewTransaction {
    pub fn normalized(mut self) -> Self {
        self.wallet_id = self.wallet_id.trim().to_string();
        self.category_id = trim_optional(self.category_id);
        self.description = self.description.trim().to_string();
        self.tags = normalize_tags(&self.tags);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_required_id("walletId", &self.wallet_id)?;
        validate_positive("amount", self.amount)?;
        Ok(())
    }

    pub fn balance_effect(&self) -> Decimal {
        balance_effect(self.transaction_type, self.amount)
    }
}

/// Lowercases, trims and deduplicates tags, keeping first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

/// Filter for transaction queries. Date bounds are inclusive calendar dates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub wallet_id: Option<String>,
    pub category_id: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring of the description.
    pub search: Option<String>,
    /// Matches transactions carrying all of these tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TransactionFilter {
    pub fn for_period(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Default::default()
        }
    }

    /// Returns a copy with the search term and tags normalized the same way stored data is.
    pub fn normalized(&self) -> Self {
        let mut filter = self.clone();
        filter.search = trim_optional(filter.search).map(|s| s.to_lowercase());
        filter.tags = normalize_tags(&filter.tags);
        filter
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(Error::invalid_input(
                    "End date cannot be before start date",
                ));
            }
        }
        Ok(())
    }

    /// In-process evaluation of the filter; expects a normalized filter.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let date = transaction.transaction_date.date();
        self.wallet_id
            .as_ref()
            .map_or(true, |id| &transaction.wallet_id == id)
            && self
                .category_id
                .as_ref()
                .map_or(true, |id| transaction.category_id.as_ref() == Some(id))
            && self
                .transaction_type
                .map_or(true, |t| transaction.transaction_type == t)
            && self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
            && self.search.as_ref().map_or(true, |needle| {
                transaction.description.to_lowercase().contains(needle)
            })
            && self.tags.iter().all(|tag| transaction.tags.contains(tag))
    }
}

/// Pagination for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub limit: i64,
    pub offset: i64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

impl ListParams {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }.normalized()
    }

    /// Non-positive limits fall back to the default; large ones are clamped.
    pub fn normalized(self) -> Self {
        let limit = if self.limit <= 0 {
            DEFAULT_LIST_LIMIT
        } else {
            self.limit.min(MAX_LIST_LIMIT)
        };
        Self {
            limit,
            offset: self.offset.max(0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category_id: Option<String>,
    pub category_name: String,
    pub total: Decimal,
    pub count: i64,
    /// Share of the filtered total, in percent.
    pub percentage: Decimal,
}

/// Totals income and expense amounts.
pub fn summarize<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> TransactionSummary {
    let mut summary = TransactionSummary::default();
    for tx in transactions {
        match tx.transaction_type {
            TransactionType::Income => summary.total_income += tx.amount,
            TransactionType::Expense => summary.total_expense += tx.amount,
        }
        summary.count += 1;
    }
    summary.net = summary.total_income - summary.total_expense;
    summary
}

/// Groups `(category_id, category_name, amount)` rows into per-category totals,
/// sorted by total descending.
pub fn summarize_by_category(
    rows: impl IntoIterator<Item = (Option<String>, Option<String>, Decimal)>,
) -> Vec<CategorySummary> {
    let mut grouped: HashMap<Option<String>, CategorySummary> = HashMap::new();
    let mut grand_total = Decimal::ZERO;

    for (category_id, category_name, amount) in rows {
        grand_total += amount;
        let entry = grouped
            .entry(category_id.clone())
            .or_insert_with(|| CategorySummary {
                category_id,
                category_name: category_name.unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string()),
                total: Decimal::ZERO,
                count: 0,
                percentage: Decimal::ZERO,
            });
        entry.total += amount;
        entry.count += 1;
    }

    let mut summaries: Vec<CategorySummary> = grouped
        .into_values()
        .map(|mut summary| {
            if !grand_total.is_zero() {
                summary.percentage = (summary.total / grand_total * Decimal::ONE_HUNDRED)
                    .round_dp(DISPLAY_DECIMAL_PRECISION);
            }
            summary
        })
        .collect();
    summaries.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
    summaries
}
