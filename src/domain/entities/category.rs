//! Category entity and repository trait.
//!
//! Maps to the `categories` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::product::Product;
use crate::shared::error::StoreError;

/// A named grouping of products.
///
/// Maps to the `categories` table:
/// - id: INTEGER PRIMARY KEY (identity, overridable on insert)
/// - name: TEXT NOT NULL, never blank
/// - description: TEXT NULL
///
/// `products` is the derived back-reference (every product whose
/// `category_id` equals `id`); it is never stored on the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Identity assigned by the store
    pub id: i32,

    /// Category name
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Products owned by this category, ordered by id
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Row to insert. `id: None` lets the store assign the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
}

/// Repository trait for Category data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List every category ordered by id, optionally with products attached.
    async fn find_all(&self, include_products: bool) -> Result<Vec<Category>, StoreError>;

    /// Find a category by id, optionally with products attached.
    async fn find_by_id(
        &self,
        id: i32,
        include_products: bool,
    ) -> Result<Option<Category>, StoreError>;

    /// Whether a category with this id exists.
    async fn exists_by_id(&self, id: i32) -> Result<bool, StoreError>;

    /// Insert a new category and return the persisted row.
    async fn insert(&self, category: &NewCategory) -> Result<Category, StoreError>;

    /// Overwrite name and description. `None` if the row no longer exists.
    async fn update(&self, category: &Category) -> Result<Option<Category>, StoreError>;

    /// Count products referencing the category.
    async fn count_products(&self, id: i32) -> Result<i64, StoreError>;

    /// Remove the category row. Fails with a foreign-key violation while
    /// products still reference it.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// Remove the category together with its products in one transaction.
    async fn delete_with_products(&self, id: i32) -> Result<bool, StoreError>;
}
