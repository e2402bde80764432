//! Value Objects
//!
//! Immutable value types shared by the catalog entities and services.

mod delete_policy;

pub use delete_policy::CategoryDeletePolicy;
