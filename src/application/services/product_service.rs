//! Product Service
//!
//! Product CRUD. Every write passes through one gate that checks the field
//! rules and that the referenced category exists; nothing is written unless
//! the whole gate passes.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::domain::{CategoryRepository, NewProduct, Product, ProductRepository};
use crate::shared::error::StoreError;
use crate::shared::validation::{
    explicit_id_violation, has_price_scale, is_blank, Rule, ValidationFailure, Violation,
};

/// Product service trait
#[async_trait]
pub trait ProductService: Send + Sync {
    /// List all products.
    async fn get_all(&self) -> Result<Vec<Product>, ProductError>;

    /// Get a product. `None` when absent.
    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, ProductError>;

    /// Whether a product with this id exists.
    async fn exists_by_id(&self, id: i32) -> Result<bool, ProductError>;

    /// Create a product in an existing category.
    async fn add(&self, request: CreateProductDto) -> Result<Product, ProductError>;

    /// Overwrite every mutable field. `None` when the id is absent.
    async fn update(
        &self,
        id: i32,
        update: UpdateProductDto,
    ) -> Result<Option<Product>, ProductError>;

    /// Delete a product. `false` when the id is absent.
    async fn delete(&self, id: i32) -> Result<bool, ProductError>;
}

/// Create product request
#[derive(Debug, Clone)]
pub struct CreateProductDto {
    /// Client-chosen identity; `None` lets the store assign one.
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
}

/// Update product request
#[derive(Debug, Clone)]
pub struct UpdateProductDto {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
}

/// Product service errors
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Product with ID {0} already exists")]
    AlreadyExists(i32),

    #[error("Invalid product: {0}")]
    Validation(ValidationFailure),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProductError {
    /// True when the product pointed at a category that does not exist.
    pub fn is_dangling_category(&self) -> bool {
        matches!(self, ProductError::Validation(f) if f.is_referential())
    }
}

/// ProductService implementation
pub struct ProductServiceImpl<P, C>
where
    P: ProductRepository,
    C: CategoryRepository,
{
    product_repo: Arc<P>,
    category_repo: Arc<C>,
}

impl<P, C> ProductServiceImpl<P, C>
where
    P: ProductRepository,
    C: CategoryRepository,
{
    pub fn new(product_repo: Arc<P>, category_repo: Arc<C>) -> Self {
        Self {
            product_repo,
            category_repo,
        }
    }

    /// Field rules plus the category reference, all collected before any write.
    async fn validate(
        &self,
        id: Option<i32>,
        name: &str,
        price: Decimal,
        category_id: i32,
    ) -> Result<(), ProductError> {
        let mut violations: Vec<Violation> = explicit_id_violation(id).into_iter().collect();

        if is_blank(name) {
            violations.push(Violation::new(
                "name",
                Rule::Required,
                "Product name is required.",
            ));
        }
        if price <= Decimal::ZERO {
            violations.push(Violation::new(
                "price",
                Rule::Positive,
                "Price must be greater than zero.",
            ));
        } else if !has_price_scale(price) {
            violations.push(Violation::new(
                "price",
                Rule::Format,
                "Price must have at most two decimal places.",
            ));
        }
        if !self.category_repo.exists_by_id(category_id).await? {
            violations.push(missing_category(category_id));
        }

        ValidationFailure::check(violations).map_err(ProductError::Validation)
    }
}

fn missing_category(category_id: i32) -> Violation {
    Violation::new(
        "category_id",
        Rule::Exists,
        format!("Category with ID {} does not exist.", category_id),
    )
}

/// A foreign-key failure at write time means the category vanished after
/// the gate passed.
fn write_error(e: StoreError, category_id: i32) -> ProductError {
    match e {
        StoreError::ForeignKeyViolation(_) => {
            ProductError::Validation(ValidationFailure::new(vec![missing_category(category_id)]))
        }
        e => ProductError::Store(e),
    }
}

#[async_trait]
impl<P, C> ProductService for ProductServiceImpl<P, C>
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    async fn get_all(&self) -> Result<Vec<Product>, ProductError> {
        Ok(self.product_repo.find_all().await?)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, ProductError> {
        Ok(self.product_repo.find_by_id(id).await?)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, ProductError> {
        Ok(self.product_repo.exists_by_id(id).await?)
    }

    #[instrument(skip(self, request), fields(id = ?request.id, category_id = request.category_id))]
    async fn add(&self, request: CreateProductDto) -> Result<Product, ProductError> {
        let id = request.id.filter(|id| *id != 0);
        if let Some(id) = id {
            if self.product_repo.exists_by_id(id).await? {
                debug!(id, "Rejected product with duplicate id");
                return Err(ProductError::AlreadyExists(id));
            }
        }

        self.validate(request.id, &request.name, request.price, request.category_id)
            .await
            .inspect_err(|e| debug!(error = %e, "Rejected product"))?;

        let new_product = NewProduct {
            id,
            name: request.name,
            description: request.description,
            price: request.price,
            category_id: request.category_id,
        };

        let created = self
            .product_repo
            .insert(&new_product)
            .await
            .map_err(|e| match (e, id) {
                (StoreError::UniqueViolation(_), Some(id)) => ProductError::AlreadyExists(id),
                (e, _) => write_error(e, new_product.category_id),
            })?;

        info!(id = created.id, category_id = created.category_id, "Product created");
        Ok(created)
    }

    #[instrument(skip(self, update), fields(category_id = update.category_id))]
    async fn update(
        &self,
        id: i32,
        update: UpdateProductDto,
    ) -> Result<Option<Product>, ProductError> {
        self.validate(None, &update.name, update.price, update.category_id)
            .await
            .inspect_err(|e| debug!(error = %e, "Rejected product update"))?;

        let Some(mut product) = self.product_repo.find_by_id(id).await? else {
            return Ok(None);
        };

        product.name = update.name;
        product.description = update.description;
        product.price = update.price;
        product.category_id = update.category_id;

        let updated = self
            .product_repo
            .update(&product)
            .await
            .map_err(|e| write_error(e, product.category_id))?;

        if updated.is_some() {
            info!(id, "Product updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<bool, ProductError> {
        let deleted = self.product_repo.delete(id).await?;
        if deleted {
            info!(id, "Product deleted");
        }
        Ok(deleted)
    }
}
