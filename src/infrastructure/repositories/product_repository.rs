//! Product Repository Implementation
//!
//! PostgreSQL implementation of the ProductRepository trait.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::sync_identity;
use crate::domain::{NewProduct, Product, ProductRepository};
use crate::shared::error::StoreError;

/// Database row representation matching the products table schema.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct ProductRow {
    id: i32,
    name: String,
    description: Option<String>,
    price: Decimal,
    category_id: i32,
}

impl ProductRow {
    pub(super) fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            category_id: self.category_id,
        }
    }
}

/// PostgreSQL product repository implementation.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new PgProductRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, category_id FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, category_id FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = match product.id {
            Some(id) => {
                let row = sqlx::query_as::<_, ProductRow>(
                    r#"
                    INSERT INTO products (id, name, description, price, category_id)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id, name, description, price, category_id
                    "#,
                )
                .bind(id)
                .bind(&product.name)
                .bind(&product.description)
                .bind(product.price)
                .bind(product.category_id)
                .fetch_one(&mut *tx)
                .await?;

                sync_identity(&mut tx, "products").await?;
                row
            }
            None => {
                sqlx::query_as::<_, ProductRow>(
                    r#"
                    INSERT INTO products (name, description, price, category_id)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, name, description, price, category_id
                    "#,
                )
                .bind(&product.name)
                .bind(&product.description)
                .bind(product.price)
                .bind(product.category_id)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        Ok(row.into_product())
    }

    async fn update(&self, product: &Product) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                price = $4,
                category_id = $5
            WHERE id = $1
            RETURNING id, name, description, price, category_id
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
