//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (gateway answers a read)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 if the records gateway answers a read.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if check_gateway_health(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let gateway_ok = check_gateway_health(&state).await;

    Json(HealthResponse {
        status: if gateway_ok { "healthy" } else { "degraded" }.to_string(),
        gateway: if gateway_ok { "ok" } else { "error" }.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn check_gateway_health(state: &AppState) -> bool {
    match state.gateway.fetch_all().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Gateway health check failed");
            false
        }
    }
}
