//! Goal repository and service traits.

use async_trait::async_trait;

use super::goals_model::{
    Goal, GoalContribution, GoalProgress, GoalStatus, GoalUpdate, NewGoal,
};
use crate::errors::Result;

/// Trait defining the contract for Goal repository operations.
///
/// Contributions are written through [`crate::unit_of_work::LedgerScope`]
/// so that the row and the goal increment share one atomic unit.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Inserts an active goal with a zero current amount.
    async fn create(&self, new_goal: NewGoal) -> Result<Goal>;

    async fn update(&self, goal_update: GoalUpdate) -> Result<Goal>;

    async fn update_status(&self, goal_id: &str, status: GoalStatus) -> Result<Goal>;

    /// Deletes the goal and its contributions.
    async fn delete(&self, goal_id: &str) -> Result<()>;

    fn get_by_id(&self, goal_id: &str) -> Result<Goal>;

    fn list(&self, status: Option<GoalStatus>) -> Result<Vec<Goal>>;

    /// Contributions for a goal, newest first.
    fn get_contributions(&self, goal_id: &str) -> Result<Vec<GoalContribution>>;
}

/// Trait defining the contract for Goal service operations.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;

    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal>;

    async fn delete_goal(&self, goal_id: &str) -> Result<()>;

    /// Records a contribution and increments the goal atomically, then
    /// completes the goal if the target is reached. The completion step is
    /// best-effort and never fails the contribution.
    async fn add_contribution(
        &self,
        goal_id: &str,
        amount: rust_decimal::Decimal,
        note: &str,
    ) -> Result<GoalContribution>;

    async fn mark_completed(&self, goal_id: &str) -> Result<Goal>;

    async fn cancel_goal(&self, goal_id: &str) -> Result<Goal>;

    fn get_goal(&self, goal_id: &str) -> Result<Goal>;

    fn list_goals(&self, status: Option<GoalStatus>) -> Result<Vec<Goal>>;

    fn get_contributions(&self, goal_id: &str) -> Result<Vec<GoalContribution>>;

    fn get_progress(&self, goal_id: &str) -> Result<GoalProgress>;
}
