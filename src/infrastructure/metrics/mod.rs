//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, route, and status
//! - HTTP request latency histograms

use once_cell::sync::Lazy;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, route, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace("catalog_server"),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace("catalog_server")
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}
