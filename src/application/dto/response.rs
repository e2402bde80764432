//! Response DTOs
//!
//! Data structures for API response bodies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Product};

/// Product response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category_id: i32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category_id: product.category_id,
        }
    }
}

/// Category response, with the products it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub products: Vec<ProductResponse>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            products: category
                .products
                .into_iter()
                .map(ProductResponse::from)
                .collect(),
        }
    }
}
