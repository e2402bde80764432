//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    CategoryService, CategoryServiceImpl, ProductService, ProductServiceImpl,
};
use crate::config::{Settings, StoreBackend};
use crate::domain::CategoryDeletePolicy;
use crate::infrastructure::database::{self, StoreProbe};
use crate::infrastructure::repositories::{
    InMemoryCatalogStore, PgCategoryRepository, PgProductRepository,
};
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryService>,
    pub products: Arc<dyn ProductService>,
    pub store: Arc<dyn StoreProbe>,
}

impl AppState {
    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool, delete_policy: CategoryDeletePolicy) -> Self {
        let category_repo = Arc::new(PgCategoryRepository::new(pool.clone()));
        let product_repo = Arc::new(PgProductRepository::new(pool.clone()));

        Self {
            categories: Arc::new(CategoryServiceImpl::new(category_repo.clone(), delete_policy)),
            products: Arc::new(ProductServiceImpl::new(product_repo, category_repo)),
            store: Arc::new(pool),
        }
    }

    /// State backed by a fresh in-process store
    pub fn in_memory(delete_policy: CategoryDeletePolicy) -> Self {
        let store = Arc::new(InMemoryCatalogStore::new());

        Self {
            categories: Arc::new(CategoryServiceImpl::new(store.clone(), delete_policy)),
            products: Arc::new(ProductServiceImpl::new(store.clone(), store.clone())),
            store,
        }
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let delete_policy = settings.catalog.category_delete_policy;
        let state = match settings.database.backend {
            StoreBackend::Postgres => {
                let pool = database::create_pool(&settings.database)
                    .await
                    .context("connecting to PostgreSQL")?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&pool)
                        .await
                        .context("applying migrations")?;
                    tracing::info!("Database migrations applied");
                }

                AppState::postgres(pool, delete_policy)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using the in-memory store; data is lost on shutdown");
                AppState::in_memory(delete_policy)
            }
        };
        tracing::info!(%delete_policy, "Catalog services ready");

        if settings.catalog.seed_demo_data {
            database::seed_demo_data(state.categories.as_ref(), state.products.as_ref()).await?;
        }

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(logging::create_trace_layer())
            .layer(cors::create_cors_layer(&settings.cors));

        // Bind to address
        let addr = settings.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("binding {}", addr))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
