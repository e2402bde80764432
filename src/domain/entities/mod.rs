//! # Domain Entities
//!
//! Core domain entities of the catalog. All entities map directly to their
//! corresponding database tables.
//!
//! - **Category**: A named grouping that owns zero or more products
//! - **Product**: A priced catalog item referencing exactly one category
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod category;
mod product;

pub use category::{Category, CategoryRepository, NewCategory};
pub use product::{NewProduct, Product, ProductRepository};

#[cfg(test)]
pub use category::MockCategoryRepository;
#[cfg(test)]
pub use product::MockProductRepository;
