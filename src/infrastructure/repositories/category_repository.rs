//! Category Repository Implementation
//!
//! PostgreSQL implementation of the CategoryRepository trait.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use super::product_repository::ProductRow;
use super::sync_identity;
use crate::domain::{Category, CategoryRepository, NewCategory, Product};
use crate::shared::error::StoreError;

/// Database row representation matching the categories table schema.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    description: Option<String>,
}

impl CategoryRow {
    /// Convert database row to domain Category entity.
    fn into_category(self, products: Vec<Product>) -> Category {
        Category {
            id: self.id,
            name: self.name,
            description: self.description,
            products,
        }
    }
}

/// PostgreSQL category repository implementation.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn products_of(&self, category_id: i32) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, category_id
            FROM products
            WHERE category_id = $1
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_all(&self, include_products: bool) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        if !include_products {
            return Ok(rows.into_iter().map(|r| r.into_category(Vec::new())).collect());
        }

        let product_rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, category_id FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_category: HashMap<i32, Vec<Product>> = HashMap::new();
        for row in product_rows {
            let product = row.into_product();
            by_category.entry(product.category_id).or_default().push(product);
        }

        Ok(rows
            .into_iter()
            .map(|r| {
                let products = by_category.remove(&r.id).unwrap_or_default();
                r.into_category(products)
            })
            .collect())
    }

    async fn find_by_id(
        &self,
        id: i32,
        include_products: bool,
    ) -> Result<Option<Category>, StoreError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let products = if include_products {
            self.products_of(id).await?
        } else {
            Vec::new()
        };

        Ok(Some(row.into_category(products)))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, category: &NewCategory) -> Result<Category, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = match category.id {
            Some(id) => {
                let row = sqlx::query_as::<_, CategoryRow>(
                    r#"
                    INSERT INTO categories (id, name, description)
                    VALUES ($1, $2, $3)
                    RETURNING id, name, description
                    "#,
                )
                .bind(id)
                .bind(&category.name)
                .bind(&category.description)
                .fetch_one(&mut *tx)
                .await?;

                sync_identity(&mut tx, "categories").await?;
                row
            }
            None => {
                sqlx::query_as::<_, CategoryRow>(
                    r#"
                    INSERT INTO categories (name, description)
                    VALUES ($1, $2)
                    RETURNING id, name, description
                    "#,
                )
                .bind(&category.name)
                .bind(&category.description)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        Ok(row.into_category(Vec::new()))
    }

    async fn update(&self, category: &Category) -> Result<Option<Category>, StoreError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = $2,
                description = $3
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let products = self.products_of(row.id).await?;
                Ok(Some(row.into_category(products)))
            }
            None => Ok(None),
        }
    }

    async fn count_products(&self, id: i32) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE category_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_with_products(&self, id: i32) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Lock the category so no product can be attached mid-delete.
        let locked = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM categories WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Ok(false);
        }

        let removed = sqlx::query("DELETE FROM products WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(id, products = removed.rows_affected(), "Cascaded category delete");
        Ok(true)
    }
}
