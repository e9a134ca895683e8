//! Database models for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use dompet_core::categories::{Category, NewCategory};
use dompet_core::errors::{Error, Result};

use crate::utils::parse_label;

/// Database model for categories
#[derive(Queryable, Identifiable, Insertable, Selectable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub category_type: String,
    pub parent_id: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CategoryDB {
    pub fn from_new(new_category: NewCategory, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: new_category.name,
            category_type: new_category.category_type.as_str().to_string(),
            parent_id: new_category.parent_id,
            color: new_category.color,
            icon: new_category.icon,
            sort_order: new_category.sort_order,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<CategoryDB> for Category {
    type Error = Error;

    fn try_from(db: CategoryDB) -> Result<Self> {
        Ok(Self {
            category_type: parse_label(&db.category_type, "categories.category_type")?,
            id: db.id,
            name: db.name,
            parent_id: db.parent_id,
            color: db.color,
            icon: db.icon,
            sort_order: db.sort_order,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Category> for CategoryDB {
    fn from(domain: Category) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            category_type: domain.category_type.as_str().to_string(),
            parent_id: domain.parent_id,
            color: domain.color,
            icon: domain.icon,
            sort_order: domain.sort_order,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
