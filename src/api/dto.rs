//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not records.
//! Records themselves go over the wire in the gateway's own shape.

use serde::{Deserialize, Serialize};

use crate::export::CsvStyle;

/// Query parameters for `GET /api/v1/export`
#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    /// Falls back to the configured style
    #[serde(default)]
    pub style: Option<CsvStyle>,
}

/// Reply to an accepted mutation
#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    /// Status: "ok"
    pub status: String,
    /// The action that was forwarded
    pub action: String,
    #[serde(rename = "registerNumber")]
    pub register_number: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Gateway reachability: "ok" or "error"
    pub gateway: String,
    pub uptime_seconds: u64,
    pub version: String,
}
