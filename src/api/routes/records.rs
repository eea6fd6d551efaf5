//! Record Routes
//!
//! Pass-through to the records gateway, speaking the gateway's own protocol so
//! the dashboard can point at either one.
//!
//! - GET /api/v1/records - Every valid record, as a JSON array
//! - POST /api/v1/records - One `{action, ...}` mutation
//! - DELETE /api/v1/records/:register_number - Delete by key

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::dto::MutationResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::records::Mutation;

/// Count of upstream rows dropped by validation
pub const REJECTED_HEADER: &str = "x-rejected-records";

/// GET /api/v1/records
pub async fn list_records(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let decoded = state.gateway.fetch_all().await?;

    let mut headers = HeaderMap::new();
    if !decoded.rejected.is_empty() {
        tracing::warn!(
            rejected = decoded.rejected.len(),
            "Gateway returned malformed records"
        );
        headers.insert(REJECTED_HEADER, HeaderValue::from(decoded.rejected.len()));
    }

    Ok((headers, Json(decoded.records)))
}

/// POST /api/v1/records
///
/// The body is read as text whatever its content type: browsers send these
/// as `text/plain` to stay a simple request.
pub async fn post_mutation(
    State(state): State<Arc<AppState>>,
    body: String,
) -> ApiResult<impl IntoResponse> {
    let mutation: Mutation = serde_json::from_str(&body)
        .map_err(|e| ApiError::Validation(format!("Invalid mutation: {}", e)))?;

    forward(&state, mutation).await
}

/// DELETE /api/v1/records/:register_number
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(register_number): Path<String>,
) -> ApiResult<impl IntoResponse> {
    forward(&state, Mutation::delete(register_number)).await
}

async fn forward(
    state: &AppState,
    mutation: Mutation,
) -> ApiResult<(StatusCode, Json<MutationResponse>)> {
    state.gateway.mutate(&mutation).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MutationResponse {
            status: "ok".to_string(),
            action: mutation.kind().to_string(),
            register_number: mutation.register_number().to_string(),
        }),
    ))
}
