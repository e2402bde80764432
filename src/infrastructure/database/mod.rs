//! Database Module
//!
//! PostgreSQL connection pool, migrations, store health probes and demo-data
//! seeding.

pub mod seed;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseSettings;
use crate::infrastructure::repositories::InMemoryCatalogStore;
use crate::shared::error::StoreError;

pub use seed::{seed_demo_data, SeedReport};

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(settings.connection_url())
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Liveness check against whatever backs the catalog.
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// Short backend name reported by the readiness endpoint.
    fn backend(&self) -> &'static str;

    /// Round-trip the store once.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl StoreProbe for PgPool {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self).await?;
        Ok(())
    }
}

#[async_trait]
impl StoreProbe for InMemoryCatalogStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
