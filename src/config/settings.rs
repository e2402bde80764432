//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::CategoryDeletePolicy;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Store configuration
    pub database: DatabaseSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Catalog behaviour
    pub catalog: CatalogSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Which store backs the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Store backend
    pub backend: StoreBackend,

    /// Database connection URL (required for postgres)
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

/// Catalog behaviour configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// What deleting a category that still owns products does
    pub category_delete_policy: CategoryDeletePolicy,

    /// Insert the demo catalog into empty tables on startup
    pub seed_demo_data: bool,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the postgres backend is selected without a database URL.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Self::builder(&environment)?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=3000 -> server.port = 3000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
            .and_then(Self::validate)
    }

    /// Builder pre-populated with every default.
    fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", environment)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.backend", "postgres")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("catalog.category_delete_policy", "restrict")?
            // The demo catalog is only wanted while developing
            .set_default("catalog.seed_demo_data", environment == "development")
    }

    fn validate(settings: Self) -> Result<Self, ConfigError> {
        if settings.database.backend == StoreBackend::Postgres
            && settings.database.url.as_deref().map_or(true, str::is_empty)
        {
            return Err(ConfigError::Message(
                "database.url (or DATABASE_URL) is required for the postgres backend".into(),
            ));
        }
        Ok(settings)
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DatabaseSettings {
    /// Get the connection URL.
    pub fn connection_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }
}
