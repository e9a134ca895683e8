use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use dompet_core::errors::Result;
use dompet_core::goals::{
    Goal, GoalContribution, GoalRepositoryTrait, GoalStatus, GoalUpdate, NewGoal,
    NewGoalContribution,
};

use super::model::{GoalContributionDB, GoalDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{not_found_as, StorageError};
use crate::schema::{goal_contributions, goals};

pub struct GoalRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        GoalRepository { pool, writer }
    }
}

pub(crate) fn find_goal(conn: &mut SqliteConnection, goal_id: &str) -> Result<Goal> {
    let row = goals::table
        .find(goal_id)
        .first::<GoalDB>(conn)
        .map_err(not_found_as("goal", goal_id))?;
    Goal::try_from(row)
}

/// Records a contribution and adds its amount to the goal's running total.
///
/// Must run inside the writer's transaction: the total is read and rewritten
/// on the same connection, which is what keeps concurrent contributions from
/// losing each other's increments.
pub(crate) fn add_contribution(
    conn: &mut SqliteConnection,
    contribution: NewGoalContribution,
) -> Result<GoalContribution> {
    let goal = find_goal(conn, &contribution.goal_id)?;
    let now = Utc::now().naive_utc();

    diesel::update(goals::table.find(&goal.id))
        .set((
            goals::current_amount.eq((goal.current_amount + contribution.amount).to_string()),
            goals::updated_at.eq(now),
        ))
        .execute(conn)
        .map_err(StorageError::from)?;

    let id = contribution
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let row = GoalContributionDB::from_new(contribution, id, now);
    let inserted = diesel::insert_into(goal_contributions::table)
        .values(&row)
        .returning(GoalContributionDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    GoalContribution::try_from(inserted)
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    async fn create(&self, new_goal: NewGoal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let id = new_goal
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = GoalDB::from_new(new_goal, id, Utc::now().naive_utc());
                let inserted = diesel::insert_into(goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Goal::try_from(inserted)
            })
            .await
    }

    async fn update(&self, goal_update: GoalUpdate) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let mut goal = find_goal(conn, &goal_update.id)?;
                goal_update.apply_to(&mut goal);

                // The saved amount and status have their own write paths.
                let saved = diesel::update(goals::table.find(&goal.id))
                    .set((
                        goals::name.eq(&goal.name),
                        goals::description.eq(&goal.description),
                        goals::target_amount.eq(goal.target_amount.to_string()),
                        goals::deadline.eq(goal.deadline),
                        goals::color.eq(goal.color.clone()),
                        goals::icon.eq(goal.icon.clone()),
                        goals::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Goal::try_from(saved)
            })
            .await
    }

    async fn update_status(&self, goal_id: &str, status: GoalStatus) -> Result<Goal> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let saved = diesel::update(goals::table.find(&goal_id))
                    .set((
                        goals::status.eq(status.as_str()),
                        goals::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(not_found_as("goal", &goal_id))?;
                Goal::try_from(saved)
            })
            .await
    }

    async fn delete(&self, goal_id: &str) -> Result<()> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(goals::table.find(&goal_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(dompet_core::Error::not_found(format!("goal {}", goal_id)));
                }
                Ok(())
            })
            .await
    }

    fn get_by_id(&self, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        find_goal(&mut conn, goal_id)
    }

    fn list(&self, status: Option<GoalStatus>) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = goals::table.into_boxed();
        if let Some(status) = status {
            query = query.filter(goals::status.eq(status.as_str()));
        }
        query
            .order(goals::name.asc())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Goal::try_from)
            .collect()
    }

    fn get_contributions(&self, goal_id: &str) -> Result<Vec<GoalContribution>> {
        let mut conn = get_connection(&self.pool)?;
        goal_contributions::table
            .filter(goal_contributions::goal_id.eq(goal_id))
            .order((goal_contributions::created_at.desc(), goal_contributions::id.desc()))
            .load::<GoalContributionDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(GoalContribution::try_from)
            .collect()
    }
}
