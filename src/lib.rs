//! # Catalog Server Library
//!
//! This crate provides a product catalog service with:
//! - Categories and the products filed under them
//! - Field validation and referential integrity on every write
//! - RESTful HTTP API endpoints
//! - PostgreSQL or in-memory storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Catalog entities, repository traits and the delete policy
//! - **Application Layer**: Catalog services (validation, integrity) and DTOs
//! - **Infrastructure Layer**: PostgreSQL and in-memory stores, migrations, metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! catalog_server/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, and repository traits
//! +-- application/    Catalog services and DTOs
//! +-- infrastructure/ Stores, migrations, seeding and metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Errors and validation reporting
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
