//! # Catalog Server
//!
//! A product catalog service implemented in Rust.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - The catalog store (PostgreSQL or in-memory)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use catalog_server::config::Settings;
use catalog_server::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    catalog_server::telemetry::init_tracing();

    info!("Starting Catalog Server...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        backend = ?settings.database.backend,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
