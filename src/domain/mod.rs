//! # Domain Layer
//!
//! The domain layer contains the catalog's entities and the store port.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Category and Product, plus their repository traits
//! - **value_objects**: Immutable value types (CategoryDeletePolicy)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Services receive repositories by injection, never through globals

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
