//! HTTP API
//!
//! Axum router and request handlers for the catalog.

pub mod handlers;
pub mod routes;
