use log::debug;
use std::sync::Arc;

use super::categories_model::{
    Category, CategoryType, CategoryUpdate, CategoryWithChildren, NewCategory,
};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result, ResultExt};

/// Service for managing categories
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        let new_category = new_category.normalized();
        new_category.validate()?;

        if let Some(parent_id) = &new_category.parent_id {
            let parent = self
                .repository
                .get_by_id(parent_id)
                .context("Parent category not found")?;
            if parent.category_type != new_category.category_type {
                return Err(Error::invalid_input(format!(
                    "Parent category '{}' is {}, expected {}",
                    parent.name, parent.category_type, new_category.category_type
                )));
            }
        }

        debug!("Creating category '{}'", new_category.name);
        self.repository.create(new_category).await
    }

    async fn update_category(&self, category_update: CategoryUpdate) -> Result<Category> {
        category_update.validate()?;
        self.repository.update(category_update).await
    }

    async fn delete_category(&self, category_id: &str) -> Result<()> {
        self.repository.delete(category_id).await
    }

    fn get_category(&self, category_id: &str) -> Result<Category> {
        self.repository.get_by_id(category_id)
    }

    fn list_categories(&self, category_type: Option<CategoryType>) -> Result<Vec<Category>> {
        self.repository.list(category_type)
    }

    fn get_with_children(&self, category_id: &str) -> Result<CategoryWithChildren> {
        let category = self.repository.get_by_id(category_id)?;
        let children = self.repository.list_children(category_id)?;
        Ok(CategoryWithChildren { category, children })
    }
}
