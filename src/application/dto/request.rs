//! Request DTOs
//!
//! Data structures for API request bodies. The same shape serves create
//! and update, carrying the entity id so updates can be checked against
//! the path.

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::application::services::{
    CreateCategoryDto, CreateProductDto, UpdateCategoryDto, UpdateProductDto,
};

/// Category create/update request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryRequest {
    /// Optional on create; zero or absent lets the store assign one.
    #[serde(default)]
    pub id: Option<i32>,

    #[validate(length(min = 1, message = "Category name is required."))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryRequest {
    /// Whether the body id disagrees with the path id. An absent id agrees.
    pub fn conflicts_with(&self, path_id: i32) -> bool {
        self.id.is_some_and(|id| id != path_id)
    }
}

impl From<CategoryRequest> for CreateCategoryDto {
    fn from(body: CategoryRequest) -> Self {
        Self {
            id: body.id,
            name: body.name,
            description: body.description,
        }
    }
}

impl From<CategoryRequest> for UpdateCategoryDto {
    fn from(body: CategoryRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
        }
    }
}

/// Product create/update request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductRequest {
    #[serde(default)]
    pub id: Option<i32>,

    #[validate(length(min = 1, message = "Product name is required."))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    #[validate(range(min = 1, message = "Product must have a valid CategoryId."))]
    pub category_id: i32,
}

impl ProductRequest {
    /// Whether the body id disagrees with the path id. An absent id agrees.
    pub fn conflicts_with(&self, path_id: i32) -> bool {
        self.id.is_some_and(|id| id != path_id)
    }
}

impl From<ProductRequest> for CreateProductDto {
    fn from(body: ProductRequest) -> Self {
        Self {
            id: body.id,
            name: body.name,
            description: body.description,
            price: body.price,
            category_id: body.category_id,
        }
    }
}

impl From<ProductRequest> for UpdateProductDto {
    fn from(body: ProductRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            price: body.price,
            category_id: body.category_id,
        }
    }
}
