//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        // Labelled by matched route, so it has to sit on the routes
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
}

/// Category routes
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/{category_id}",
            get(handlers::category::get_category)
                .put(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
}

/// Product routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/{product_id}",
            get(handlers::product::get_product)
                .put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
}
