//! Health Check API Tests

use axum::http::StatusCode;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
}

#[tokio::test]
async fn test_liveness() {
    let app = TestApp::new();

    let response = app.get("/health/live").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_reports_store() {
    let app = TestApp::new();

    let response = app.get("/health/ready").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["checks"]["store"]["backend"], "memory");
    assert_ne!(response.body["checks"]["store"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = TestApp::new();
    app.get("/api/v1/categories").await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    let text = response.body.as_str().unwrap();
    assert!(text.contains("catalog_server_http_requests_total"));
    assert!(text.contains("/api/v1/categories"));
}
