//! HTTP API Client
//!
//! Talks to the records endpoint: one URL, `GET` for every record and `POST`
//! for each write action.

use gloo_net::http::Request;
use serde_json::Value;

use crate::records::{decode_records, Decoded};

/// Local proxy started with `scoreboard-api`
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8082/api/v1/records";

const STORAGE_KEY: &str = "scoreboard_gateway_url";

/// Gateway URL from local storage, then the build-time value, then the default
pub fn get_gateway_url() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty());

    stored
        .or_else(|| option_env!("SCOREBOARD_GATEWAY_URL").map(str::to_string))
        .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string())
}

/// Fetch and validate every record
pub async fn fetch_records() -> Result<Decoded, String> {
    let url = get_gateway_url();

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Gateway returned {}", response.status()));
    }

    let document: Value = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    decode_records(document)
}

/// Send one write action.
///
/// The body is JSON but labelled `text/plain`, which keeps the request
/// "simple" so browsers skip the CORS preflight the gateway cannot answer.
pub async fn post_action(body: &Value) -> Result<(), String> {
    let url = get_gateway_url();

    let response = Request::post(&url)
        .header("Content-Type", "text/plain;charset=utf-8")
        .body(body.to_string())
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(format!("Gateway returned {}: {}", response.status(), text));
    }

    Ok(())
}
