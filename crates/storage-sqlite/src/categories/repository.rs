use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use dompet_core::categories::{
    Category, CategoryRepositoryTrait, CategoryType, CategoryUpdate, NewCategory,
};
use dompet_core::errors::Result;

use super::model::CategoryDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{not_found_as, StorageError};
use crate::schema::categories;

pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CategoryRepository { pool, writer }
    }
}

fn find_category(conn: &mut SqliteConnection, category_id: &str) -> Result<Category> {
    let row = categories::table
        .find(category_id)
        .select(CategoryDB::as_select())
        .first::<CategoryDB>(conn)
        .map_err(not_found_as("category", category_id))?;
    Category::try_from(row)
}

fn into_categories(rows: Vec<CategoryDB>) -> Result<Vec<Category>> {
    rows.into_iter().map(Category::try_from).collect()
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let id = new_category
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = CategoryDB::from_new(new_category, id, Utc::now().naive_utc());
                let inserted = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Category::try_from(inserted)
            })
            .await
    }

    async fn update(&self, category_update: CategoryUpdate) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let mut category = find_category(conn, &category_update.id)?;
                category_update.apply_to(&mut category);
                category.updated_at = Utc::now().naive_utc();

                let row = CategoryDB::from(category);
                let saved = diesel::update(categories::table.find(row.id.clone()))
                    .set(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Category::try_from(saved)
            })
            .await
    }

    /// Children, transactions and recurring templates lose the reference;
    /// budgets of the category are removed with it.
    async fn delete(&self, category_id: &str) -> Result<()> {
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(categories::table.find(&category_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(dompet_core::Error::not_found(format!(
                        "category {}",
                        category_id
                    )));
                }
                Ok(())
            })
            .await
    }

    fn get_by_id(&self, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;
        find_category(&mut conn, category_id)
    }

    fn list(&self, category_type: Option<CategoryType>) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = categories::table.into_boxed();
        if let Some(category_type) = category_type {
            query = query.filter(categories::category_type.eq(category_type.as_str()));
        }
        let rows = query
            .order((categories::sort_order.asc(), categories::name.asc()))
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_categories(rows)
    }

    fn list_children(&self, parent_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(categories::parent_id.eq(parent_id))
            .order((categories::sort_order.asc(), categories::name.asc()))
            .select(CategoryDB::as_select())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_categories(rows)
    }
}
