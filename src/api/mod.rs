//! Scoreboard Proxy API
//!
//! HTTP layer in front of the records gateway, built with Axum. It speaks the
//! gateway's own protocol on `/api/v1/records`, so the dashboard and the CLI
//! can be pointed at it instead of the remote endpoint (useful when the
//! remote endpoint does not send CORS headers).
//!
//! # Endpoints
//!
//! ## Records
//! - `GET /api/v1/records` - Every valid record
//! - `POST /api/v1/records` - Forward one `{action, ...}` mutation
//! - `DELETE /api/v1/records/:register_number` - Forward a delete
//!
//! ## Export
//! - `GET /api/v1/export` - `student_scores.csv` download
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use scoreboard::api::{serve, AppState};
//! use scoreboard::config::Config;
//! use scoreboard::gateway::HttpGateway;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let gateway = Arc::new(HttpGateway::new(config.gateway.clone())?);
//!
//!     let state = AppState::new(gateway, config.api.clone());
//!     serve(state).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Record routes
        .route(
            "/records",
            get(routes::records::list_records).post(routes::records::post_mutation),
        )
        .route(
            "/records/:register_number",
            delete(routes::records::delete_record),
        )
        // Export routes
        .route("/export", get(routes::export::export_records));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Allow the configured origins, or any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed)
    }
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Scoreboard API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Scoreboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::gateway::{Gateway, InMemoryGateway};
    use crate::records::{Mutation, Scores, StudentRecord};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app(records: Vec<StudentRecord>) -> (Router, Arc<InMemoryGateway>) {
        let gateway = Arc::new(InMemoryGateway::with_records(records));
        let state = AppState::new(gateway.clone(), ApiConfig::default());
        (build_router(state), gateway)
    }

    fn sample() -> Vec<StudentRecord> {
        vec![StudentRecord::new("0042", "Asha", Scores::new(8.0, 7.0, 9.0, 6.0), "Essay")]
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _) = create_test_app(Vec::new());

        let response = app
            .oneshot(Request::builder().uri("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _) = create_test_app(Vec::new());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let health: dto::HealthResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.gateway, "ok");
    }

    #[tokio::test]
    async fn test_list_records_gateway_shape() {
        let (app, _) = create_test_app(sample());

        let response = app
            .oneshot(Request::builder().uri("/api/v1/records").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(routes::records::REJECTED_HEADER).is_none());

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body[0]["registerNumber"], "0042");
        assert_eq!(body[0]["d"], 8.0);
    }

    #[tokio::test]
    async fn test_post_plain_text_mutation() {
        let (app, gateway) = create_test_app(Vec::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/records")
                    .header(header::CONTENT_TYPE, "text/plain;charset=UTF-8")
                    .body(Body::from(
                        r#"{"action":"create","registerNumber":"1","name":"Lin","d":1,"s":2,"c":3,"i":4}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let records = gateway.fetch_all().await.unwrap().records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scores, Scores::new(1.0, 2.0, 3.0, 4.0));
    }

    #[tokio::test]
    async fn test_post_invalid_mutation() {
        let (app, gateway) = create_test_app(Vec::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/records")
                    .body(Body::from(r#"{"action":"drop","registerNumber":"1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(gateway.mutation_log().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_route() {
        let (app, gateway) = create_test_app(sample());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/records/0042")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(gateway.mutation_log().await, vec![Mutation::delete("0042")]);
        assert!(gateway.fetch_all().await.unwrap().records.is_empty());
    }

    #[tokio::test]
    async fn test_export_download() {
        let (app, _) = create_test_app(sample());

        let response = app
            .oneshot(Request::builder().uri("/api/v1/export").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"student_scores.csv\""
        );

        let text = body_text(response).await;
        assert_eq!(
            text,
            "Register Number,Name,D,S,C,I,Assignment\n=\"0042\",Asha,8,7,9,6,Essay"
        );
    }

    #[tokio::test]
    async fn test_export_empty_is_no_content() {
        let (app, _) = create_test_app(Vec::new());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export?style=rfc4180")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
