//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **CategoryService**: Category CRUD and the category existence lookup
//! - **ProductService**: Product CRUD guarded by field and category checks

pub mod category_service;
pub mod product_service;

// Re-export category service types
pub use category_service::{
    CategoryError, CategoryService, CategoryServiceImpl, CreateCategoryDto, UpdateCategoryDto,
};

// Re-export product service types
pub use product_service::{
    CreateProductDto, ProductError, ProductService, ProductServiceImpl, UpdateProductDto,
};
