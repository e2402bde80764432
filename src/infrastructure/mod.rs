//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database pool, migrations and seeding (PostgreSQL)
//! - Repository implementations (PostgreSQL and in-memory)
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
