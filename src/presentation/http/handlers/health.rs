//! Health Check Handlers
//!
//! Provides health check endpoints for Kubernetes-style liveness and readiness probes.
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/live` - Liveness probe (is the server running?)
//! - `GET /health/ready` - Readiness probe (can the store be reached?)

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::time::Instant;

use crate::infrastructure::database::StoreProbe;
use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Store round-trips slower than this report as degraded
const STORE_DEGRADED_AFTER_MS: u64 = 100;

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

/// Basic health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Detailed health check response
#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub checks: HealthChecks,
}

/// Individual dependency checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: StoreHealth,
}

/// Health of the catalog store
#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub backend: &'static str,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Simple liveness response
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness probe - checks if the server is running
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// Readiness probe - checks if the server can accept traffic
/// Returns 200 if ready, 503 if the store is unavailable
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let store = check_store(state.store.as_ref()).await;
    let status = store.status;

    let response = DetailedHealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        started_at: SERVER_START_TIME.to_rfc3339(),
        checks: HealthChecks { store },
    };

    let status_code = match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Check store connectivity and latency
async fn check_store(probe: &dyn StoreProbe) -> StoreHealth {
    let start = Instant::now();
    match probe.ping().await {
        Ok(()) => {
            let latency = start.elapsed().as_millis() as u64;
            StoreHealth {
                backend: probe.backend(),
                status: classify_latency(latency),
                latency_ms: Some(latency),
                message: None,
            }
        }
        Err(e) => StoreHealth {
            backend: probe.backend(),
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            message: Some(format!("Store unreachable: {}", e)),
        },
    }
}

fn classify_latency(latency_ms: u64) -> HealthStatus {
    if latency_ms < STORE_DEGRADED_AFTER_MS {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    }
}
