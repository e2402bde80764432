//! Product entity and repository trait.
//!
//! Maps to the `products` table in the database schema.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::error::StoreError;

/// A catalog item belonging to exactly one category.
///
/// Maps to the `products` table:
/// - id: INTEGER PRIMARY KEY (identity, overridable on insert)
/// - name: TEXT NOT NULL, never blank
/// - description: TEXT NULL
/// - price: NUMERIC(18, 2) NOT NULL, > 0
/// - category_id: INTEGER NOT NULL REFERENCES categories(id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
}

impl Product {
    /// Check if this product belongs to the given category.
    pub fn belongs_to(&self, category_id: i32) -> bool {
        self.category_id == category_id
    }
}

/// Row to insert. `id: None` lets the store assign the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
}

/// Repository trait for Product data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List every product ordered by id.
    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Find a product by id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StoreError>;

    /// Whether a product with this id exists.
    async fn exists_by_id(&self, id: i32) -> Result<bool, StoreError>;

    /// Insert a new product. A dangling `category_id` surfaces as a
    /// foreign-key violation.
    async fn insert(&self, product: &NewProduct) -> Result<Product, StoreError>;

    /// Overwrite every mutable field. `None` if the row no longer exists.
    async fn update(&self, product: &Product) -> Result<Option<Product>, StoreError>;

    /// Remove the product row.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}
