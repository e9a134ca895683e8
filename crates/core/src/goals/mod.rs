//! Goals module - savings targets funded by contributions.

mod goals_model;
mod goals_service;
mod goals_traits;


pub use goals_model::{
    Goal, GoalContribution, GoalProgress, GoalStatus, GoalUpdate, NewGoal, NewGoalContribution,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
