//! Category Service
//!
//! Category CRUD plus the existence lookup the product side relies on.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::domain::{Category, CategoryDeletePolicy, CategoryRepository, NewCategory};
use crate::shared::error::StoreError;
use crate::shared::validation::{
    explicit_id_violation, is_blank, Rule, ValidationFailure, Violation,
};

/// Category service trait
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// List all categories with their products.
    async fn get_all(&self) -> Result<Vec<Category>, CategoryError>;

    /// Get a category with its products. `None` when absent.
    async fn get_by_id(&self, id: i32) -> Result<Option<Category>, CategoryError>;

    /// Whether a category with this id exists.
    async fn exists_by_id(&self, id: i32) -> Result<bool, CategoryError>;

    /// Create a category.
    async fn add(&self, request: CreateCategoryDto) -> Result<Category, CategoryError>;

    /// Overwrite name and description. `None` when the id is absent.
    async fn update(
        &self,
        id: i32,
        update: UpdateCategoryDto,
    ) -> Result<Option<Category>, CategoryError>;

    /// Delete a category. `false` when the id is absent.
    async fn delete(&self, id: i32) -> Result<bool, CategoryError>;
}

/// Create category request
#[derive(Debug, Clone, Default)]
pub struct CreateCategoryDto {
    /// Client-chosen identity; `None` lets the store assign one.
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
}

/// Update category request
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryDto {
    pub name: String,
    pub description: Option<String>,
}

/// Category service errors
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error("Category with ID {0} already exists")]
    AlreadyExists(i32),

    #[error("Invalid category: {0}")]
    Validation(ValidationFailure),

    #[error("Category {id} is still referenced by {products} product(s)")]
    InUse { id: i32, products: i64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// CategoryService implementation
pub struct CategoryServiceImpl<C>
where
    C: CategoryRepository,
{
    category_repo: Arc<C>,
    delete_policy: CategoryDeletePolicy,
}

impl<C> CategoryServiceImpl<C>
where
    C: CategoryRepository,
{
    pub fn new(category_repo: Arc<C>, delete_policy: CategoryDeletePolicy) -> Self {
        Self {
            category_repo,
            delete_policy,
        }
    }

    fn validate(name: &str, id: Option<i32>) -> Result<(), CategoryError> {
        let mut violations: Vec<Violation> = explicit_id_violation(id).into_iter().collect();
        if is_blank(name) {
            violations.push(Violation::new(
                "name",
                Rule::Required,
                "Category name is required.",
            ));
        }
        ValidationFailure::check(violations).map_err(CategoryError::Validation)
    }
}

#[async_trait]
impl<C> CategoryService for CategoryServiceImpl<C>
where
    C: CategoryRepository + 'static,
{
    async fn get_all(&self) -> Result<Vec<Category>, CategoryError> {
        Ok(self.category_repo.find_all(true).await?)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Category>, CategoryError> {
        Ok(self.category_repo.find_by_id(id, true).await?)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, CategoryError> {
        Ok(self.category_repo.exists_by_id(id).await?)
    }

    #[instrument(skip(self, request), fields(id = ?request.id))]
    async fn add(&self, request: CreateCategoryDto) -> Result<Category, CategoryError> {
        Self::validate(&request.name, request.id)?;

        // Zero is the "unset" identity of the wire shape.
        let id = request.id.filter(|id| *id != 0);
        if let Some(id) = id {
            if self.category_repo.exists_by_id(id).await? {
                debug!(id, "Rejected category with duplicate id");
                return Err(CategoryError::AlreadyExists(id));
            }
        }

        let new_category = NewCategory {
            id,
            name: request.name,
            description: request.description,
        };

        let created = self
            .category_repo
            .insert(&new_category)
            .await
            .map_err(|e| match (e, id) {
                (StoreError::UniqueViolation(_), Some(id)) => CategoryError::AlreadyExists(id),
                (e, _) => CategoryError::Store(e),
            })?;

        info!(id = created.id, name = %created.name, "Category created");
        Ok(created)
    }

    #[instrument(skip(self, update))]
    async fn update(
        &self,
        id: i32,
        update: UpdateCategoryDto,
    ) -> Result<Option<Category>, CategoryError> {
        Self::validate(&update.name, None)?;

        let Some(mut category) = self.category_repo.find_by_id(id, false).await? else {
            return Ok(None);
        };

        category.name = update.name;
        category.description = update.description;

        let updated = self.category_repo.update(&category).await?;
        if updated.is_some() {
            info!(id, "Category updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<bool, CategoryError> {
        debug!(policy = %self.delete_policy, "Deleting category");
        match self.delete_policy {
            CategoryDeletePolicy::Restrict => {
                let products = self.category_repo.count_products(id).await?;
                if products > 0 {
                    debug!(id, products, "Refused to delete referenced category");
                    return Err(CategoryError::InUse { id, products });
                }

                match self.category_repo.delete(id).await {
                    Ok(deleted) => {
                        if deleted {
                            info!(id, "Category deleted");
                        }
                        Ok(deleted)
                    }
                    // A product was attached between the count and the delete.
                    // It may be gone again by the recount; the delete still failed.
                    Err(StoreError::ForeignKeyViolation(_)) => {
                        let products = self.category_repo.count_products(id).await?.max(1);
                        Err(CategoryError::InUse { id, products })
                    }
                    Err(e) => Err(e.into()),
                }
            }
            CategoryDeletePolicy::Cascade => {
                let deleted = self.category_repo.delete_with_products(id).await?;
                if deleted {
                    info!(id, "Category deleted with its products");
                }
                Ok(deleted)
            }
        }
    }
}
