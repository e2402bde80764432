//! Request Metrics Middleware

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::infrastructure::metrics::record_http_request;

/// Record count and latency for every routed request.
///
/// Labels use the route template (`/api/v1/products/{product_id}`) rather
/// than the raw path to keep label cardinality bounded.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}
