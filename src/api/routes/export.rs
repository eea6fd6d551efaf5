//! Export Routes
//!
//! - GET /api/v1/export - Current records as `student_scores.csv`

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::ExportParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::export::build_csv;

/// GET /api/v1/export
///
/// Responds `204 No Content` when there are no records to export.
pub async fn export_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let style = params.style.unwrap_or(state.export_style);
    let decoded = state.gateway.fetch_all().await?;

    let export = match build_csv(&decoded.records, style)? {
        Some(export) => export,
        None => return Ok(StatusCode::NO_CONTENT.into_response()),
    };

    tracing::info!(rows = export.rows, style = %style, "Serving CSV export");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv;charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name),
            ),
        ],
        Body::from(export.content),
    )
        .into_response())
}
