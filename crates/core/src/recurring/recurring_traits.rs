//! Recurring transaction repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::recurring_model::{NewRecurringTransaction, RecurringTransaction};
use crate::errors::Result;

#[async_trait]
pub trait RecurringRepositoryTrait: Send + Sync {
    async fn create(&self, new_recurring: NewRecurringTransaction) -> Result<RecurringTransaction>;

    /// Overwrites the mutable fields of an existing template.
    async fn update(&self, recurring: RecurringTransaction) -> Result<RecurringTransaction>;

    async fn delete(&self, recurring_id: &str) -> Result<()>;

    fn get_by_id(&self, recurring_id: &str) -> Result<RecurringTransaction>;

    fn list(&self, active_only: bool) -> Result<Vec<RecurringTransaction>>;

    /// Active templates with `next_due <= as_of`, earliest first.
    fn get_due(&self, as_of: NaiveDate) -> Result<Vec<RecurringTransaction>>;
}

#[async_trait]
pub trait RecurringServiceTrait: Send + Sync {
    async fn create_recurring(
        &self,
        new_recurring: NewRecurringTransaction,
    ) -> Result<RecurringTransaction>;

    async fn update_recurring(
        &self,
        recurring: RecurringTransaction,
    ) -> Result<RecurringTransaction>;

    async fn delete_recurring(&self, recurring_id: &str) -> Result<()>;

    fn get_recurring(&self, recurring_id: &str) -> Result<RecurringTransaction>;

    fn list_recurring(&self, active_only: bool) -> Result<Vec<RecurringTransaction>>;

    /// Processes everything due as of today. See [`Self::process_due_as_of`].
    async fn process_due(&self) -> Result<usize>;

    /// Generates one transaction per due template and advances it.
    ///
    /// Items are processed independently: a failure is logged and the item is
    /// skipped. Returns the number of templates fully processed. Only a failure
    /// to load the due list is returned as an error.
    async fn process_due_as_of(&self, as_of: NaiveDate) -> Result<usize>;
}
