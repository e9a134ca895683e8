use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::goals_model::{
    Goal, GoalContribution, GoalProgress, GoalStatus, GoalUpdate, NewGoal, NewGoalContribution,
};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::{Error, Result, ResultExt};
use crate::unit_of_work::UnitOfWork;
use crate::utils::time_utils;

/// Service for managing savings goals
pub struct GoalService<U: UnitOfWork + Clone> {
    repository: Arc<dyn GoalRepositoryTrait>,
    unit_of_work: U,
}

impl<U: UnitOfWork + Clone> GoalService<U> {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>, unit_of_work: U) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    /// Moves an active goal that reached its target to completed.
    ///
    /// Errors are logged and swallowed: the contribution has already been committed.
    async fn complete_if_reached(&self, goal_id: &str) {
        let goal = match self.repository.get_by_id(goal_id) {
            Ok(goal) => goal,
            Err(e) => {
                warn!("Could not re-check goal {} after contribution: {}", goal_id, e);
                return;
            }
        };
        if !goal.should_auto_complete() {
            return;
        }
        match self
            .repository
            .update_status(goal_id, GoalStatus::Completed)
            .await
        {
            Ok(_) => debug!("Goal {} reached its target and was completed", goal_id),
            Err(e) => warn!("Failed to auto-complete goal {}: {}", goal_id, e),
        }
    }
}

#[async_trait::async_trait]
impl<U: UnitOfWork + Clone + 'static> GoalServiceTrait for GoalService<U> {
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        let new_goal = new_goal.normalized();
        new_goal.validate()?;
        debug!("Creating goal '{}'", new_goal.name);
        self.repository.create(new_goal).await
    }

    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal> {
        goal_update.validate()?;
        self.repository.update(goal_update).await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        self.repository.delete(goal_id).await
    }

    async fn add_contribution(
        &self,
        goal_id: &str,
        amount: Decimal,
        note: &str,
    ) -> Result<GoalContribution> {
        let contribution = NewGoalContribution {
            id: None,
            goal_id: goal_id.to_string(),
            amount,
            note: note.to_string(),
        }
        .normalized();
        contribution.validate()?;

        let contribution = self
            .unit_of_work
            .run_atomic(move |scope| {
                let goal = scope
                    .get_goal(&contribution.goal_id)
                    .context("Failed to load goal")?;
                if goal.status == GoalStatus::Cancelled {
                    return Err(Error::invalid_input(format!(
                        "Goal '{}' is cancelled and cannot receive contributions",
                        goal.name
                    )));
                }
                scope
                    .add_goal_contribution(contribution)
                    .context("Failed to add contribution")
            })
            .await?;

        self.complete_if_reached(&contribution.goal_id).await;
        Ok(contribution)
    }

    async fn mark_completed(&self, goal_id: &str) -> Result<Goal> {
        self.repository
            .update_status(goal_id, GoalStatus::Completed)
            .await
    }

    async fn cancel_goal(&self, goal_id: &str) -> Result<Goal> {
        self.repository
            .update_status(goal_id, GoalStatus::Cancelled)
            .await
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.repository.get_by_id(goal_id)
    }

    fn list_goals(&self, status: Option<GoalStatus>) -> Result<Vec<Goal>> {
        self.repository.list(status)
    }

    fn get_contributions(&self, goal_id: &str) -> Result<Vec<GoalContribution>> {
        self.repository.get_contributions(goal_id)
    }

    fn get_progress(&self, goal_id: &str) -> Result<GoalProgress> {
        let goal = self.repository.get_by_id(goal_id)?;
        Ok(GoalProgress::from_goal(goal, time_utils::today()))
    }
}
