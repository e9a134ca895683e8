//! Goals domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::utils::validation::{trim_optional, validate_name, validate_positive, validate_required_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
    Cancelled,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            "cancelled" => Ok(GoalStatus::Cancelled),
            other => Err(Error::invalid_input(format!(
                "Invalid goal status '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a savings goal.
///
/// `current_amount` always equals the sum of the goal's contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub description: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Percentage of the target reached, uncapped.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount.is_zero() {
            return Decimal::ZERO;
        }
        (self.current_amount / self.target_amount * Decimal::ONE_HUNDRED)
            .round_dp(DISPLAY_DECIMAL_PRECISION)
    }

    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    /// Days from `today` until the deadline, or -1 when there is none or it has passed.
    pub fn days_until_deadline(&self, today: NaiveDate) -> i64 {
        match self.deadline {
            Some(deadline) if deadline >= today => (deadline - today).num_days(),
            _ => -1,
        }
    }

    /// Whether the goal should move from active to completed.
    pub fn should_auto_complete(&self) -> bool {
        self.status == GoalStatus::Active && self.is_completed()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl NewGoal {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.color = trim_optional(self.color);
        self.icon = trim_optional(self.icon);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_name("name", &self.name)?;
        validate_positive("target amount", self.target_amount)?;
        Ok(())
    }
}

/// Partial update of a goal's descriptive fields and target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_amount: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl GoalUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_required_id("id", &self.id)?;
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        if let Some(target) = self.target_amount {
            validate_positive("target amount", target)?;
        }
        Ok(())
    }

    pub fn apply_to(&self, goal: &mut Goal) {
        if let Some(name) = &self.name {
            goal.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            goal.description = description.trim().to_string();
        }
        if let Some(target) = self.target_amount {
            goal.target_amount = target;
        }
        if self.deadline.is_some() {
            goal.deadline = self.deadline;
        }
        if self.color.is_some() {
            goal.color = trim_optional(self.color.clone());
        }
        if self.icon.is_some() {
            goal.icon = trim_optional(self.icon.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalContribution {
    pub id: String,
    pub goal_id: String,
    pub amount: Decimal,
    pub note: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoalContribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub goal_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub note: String,
}

impl NewGoalContribution {
    pub fn normalized(mut self) -> Self {
        self.goal_id = self.goal_id.trim().to_string();
        self.note = self.note.trim().to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_required_id("goalId", &self.goal_id)?;
        validate_positive("contribution amount", self.amount)?;
        Ok(())
    }
}

/// Derived view of a goal's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal: Goal,
    pub progress_percent: Decimal,
    pub remaining: Decimal,
    pub days_until_deadline: i64,
    pub is_completed: bool,
}

impl GoalProgress {
    pub fn from_goal(goal: Goal, today: NaiveDate) -> Self {
        Self {
            progress_percent: goal.progress_percent(),
            remaining: goal.remaining(),
            days_until_deadline: goal.days_until_deadline(today),
            is_completed: goal.is_completed(),
            goal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn goal(target: Decimal, current: Decimal, deadline: Option<NaiveDate>) -> Goal {
        Goal {
            id: "g1".to_string(),
            name: "Laptop".to_string(),
            description: String::new(),
            target_amount: target,
            current_amount: current,
            deadline,
            status: GoalStatus::Active,
            color: None,
            icon: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_progress_and_remaining() {
        let g = goal(dec!(1000000), dec!(800000), None);
        assert_eq!(g.progress_percent(), dec!(80));
        assert_eq!(g.remaining(), dec!(200000));
        assert!(!g.is_completed());

        let over = goal(dec!(1000000), dec!(1100000), None);
        assert_eq!(over.progress_percent(), dec!(110));
        assert_eq!(over.remaining(), dec!(0));
        assert!(over.should_auto_complete());
    }

    #[test]
    fn test_days_until_deadline() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let future = goal(dec!(1), dec!(0), NaiveDate::from_ymd_opt(2026, 1, 11));
        let past = goal(dec!(1), dec!(0), NaiveDate::from_ymd_opt(2025, 12, 31));
        assert_eq!(future.days_until_deadline(today), 10);
        assert_eq!(past.days_until_deadline(today), -1);
        assert_eq!(goal(dec!(1), dec!(0), None).days_until_deadline(today), -1);
    }

    #[test]
    fn test_contribution_validation() {
        let contribution = NewGoalContribution {
            id: None,
            goal_id: "g1".to_string(),
            amount: dec!(0),
            note: String::new(),
        };
        assert!(contribution.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_goal_validation() {
        let new_goal = NewGoal {
            id: None,
            name: "  ".to_string(),
            description: String::new(),
            target_amount: dec!(10),
            deadline: None,
            color: None,
            icon: None,
        };
        assert!(new_goal.clone().normalized().validate().is_err());

        let negative_target = NewGoal {
            name: "Trip".to_string(),
            target_amount: dec!(-1),
            ..new_goal
        };
        assert!(negative_target.validate().is_err());
    }
}
