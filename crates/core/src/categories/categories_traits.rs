//! Category repository and service traits.

use async_trait::async_trait;

use super::categories_model::{
    Category, CategoryType, CategoryUpdate, CategoryWithChildren, NewCategory,
};
use crate::errors::Result;

#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    async fn create(&self, new_category: NewCategory) -> Result<Category>;

    async fn update(&self, category_update: CategoryUpdate) -> Result<Category>;

    /// Deletes a category. Transactions referencing it keep existing with no category.
    async fn delete(&self, category_id: &str) -> Result<()>;

    fn get_by_id(&self, category_id: &str) -> Result<Category>;

    /// Lists categories ordered by sort order, then name.
    fn list(&self, category_type: Option<CategoryType>) -> Result<Vec<Category>>;

    fn list_children(&self, parent_id: &str) -> Result<Vec<Category>>;
}

#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// Creates a category; a parent, when given, must exist and share the type.
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    async fn update_category(&self, category_update: CategoryUpdate) -> Result<Category>;

    async fn delete_category(&self, category_id: &str) -> Result<()>;

    fn get_category(&self, category_id: &str) -> Result<Category>;

    fn list_categories(&self, category_type: Option<CategoryType>) -> Result<Vec<Category>>;

    fn get_with_children(&self, category_id: &str) -> Result<CategoryWithChildren>;
}
