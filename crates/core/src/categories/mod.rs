//! Categories module - reference data for classifying transactions and budgets.

mod categories_model;
mod categories_service;
mod categories_traits;


pub use categories_model::{
    Category, CategoryType, CategoryUpdate, CategoryWithChildren, NewCategory,
};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
