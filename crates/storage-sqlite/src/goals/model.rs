//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;

use dompet_core::errors::{Error, Result};
use dompet_core::goals::{Goal, GoalContribution, GoalStatus, NewGoal, NewGoalContribution};

use crate::utils::{parse_decimal, parse_label};

/// Database model for goals
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub name: String,
    pub description: String,
    pub target_amount: String,
    pub current_amount: String,
    pub deadline: Option<NaiveDate>,
    pub status: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for goal contributions
#[derive(
    Queryable, Identifiable, Insertable, Selectable, Associations, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(GoalDB, foreign_key = goal_id))]
#[diesel(table_name = crate::schema::goal_contributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalContributionDB {
    pub id: String,
    pub goal_id: String,
    pub amount: String,
    pub note: String,
    pub created_at: NaiveDateTime,
}

impl GoalDB {
    pub fn from_new(new_goal: NewGoal, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: new_goal.name,
            description: new_goal.description,
            target_amount: new_goal.target_amount.to_string(),
            current_amount: Decimal::ZERO.to_string(),
            deadline: new_goal.deadline,
            status: GoalStatus::Active.as_str().to_string(),
            color: new_goal.color,
            icon: new_goal.icon,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<GoalDB> for Goal {
    type Error = Error;

    fn try_from(db: GoalDB) -> Result<Self> {
        Ok(Self {
            target_amount: parse_decimal(&db.target_amount, "goals.target_amount")?,
            current_amount: parse_decimal(&db.current_amount, "goals.current_amount")?,
            status: parse_label(&db.status, "goals.status")?,
            id: db.id,
            name: db.name,
            description: db.description,
            deadline: db.deadline,
            color: db.color,
            icon: db.icon,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl GoalContributionDB {
    pub fn from_new(contribution: NewGoalContribution, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            goal_id: contribution.goal_id,
            amount: contribution.amount.to_string(),
            note: contribution.note,
            created_at: now,
        }
    }
}

impl TryFrom<GoalContributionDB> for GoalContribution {
    type Error = Error;

    fn try_from(db: GoalContributionDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "goal_contributions.amount")?,
            id: db.id,
            goal_id: db.goal_id,
            note: db.note,
            created_at: db.created_at,
        })
    }
}
