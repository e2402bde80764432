//! CORS Middleware Configuration

use std::time::Duration;

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsSettings;

const CATALOG_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Create CORS layer from settings.
///
/// An empty (or entirely unparsable) origin list allows any origin.
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<_> = settings
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods(CATALOG_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::LOCATION]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer
            .allow_origin(origins)
            .max_age(Duration::from_secs(3600))
    }
}
