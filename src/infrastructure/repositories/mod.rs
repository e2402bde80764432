//! Repository Implementations
//!
//! Concrete implementations of the domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgCategoryRepository** - Categories in PostgreSQL, with products attached on read
//! - **PgProductRepository** - Products in PostgreSQL
//! - **InMemoryCatalogStore** - Both tables in process memory, same integrity rules
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgCategoryRepository, PgProductRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let category_repo = PgCategoryRepository::new(pool.clone());
//!     let product_repo = PgProductRepository::new(pool.clone());
//! }
//! ```

pub mod category_repository;
pub mod memory;
pub mod product_repository;

use sqlx::{Postgres, Transaction};

use crate::shared::error::StoreError;

pub use category_repository::PgCategoryRepository;
pub use memory::InMemoryCatalogStore;
pub use product_repository::PgProductRepository;

/// Move a table's identity sequence past ids that were inserted explicitly,
/// so later store-assigned ids cannot collide with them.
async fn sync_identity(
    tx: &mut Transaction<'static, Postgres>,
    table: &'static str,
) -> Result<(), StoreError> {
    let statement = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
         GREATEST((SELECT COALESCE(MAX(id), 0) FROM {table}), 1))"
    );
    sqlx::query(&statement).execute(&mut **tx).await?;
    Ok(())
}
