//! HTTP gateway client

use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;

use super::{Gateway, GatewayError};
use crate::config::GatewayConfig;
use crate::records::{decode_records, DecodedRecords, Mutation};

/// Writes go out as plain text so browsers and script hosts treat them as
/// simple requests; the body is still JSON.
const WRITE_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Gateway client for the configured records endpoint
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// Create a client for the given endpoint configuration
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }

        let client = builder.build().map_err(GatewayError::Request)?;

        Ok(Self { client, config })
    }

    async fn error_for_status(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        GatewayError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_all(&self) -> Result<DecodedRecords, GatewayError> {
        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(GatewayError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let bytes = response.bytes().await.map_err(GatewayError::from_reqwest)?;
        let document: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(crate::records::RecordError::from)?;
        let decoded = decode_records(document)?;

        for rejected in &decoded.rejected {
            tracing::warn!(
                index = rejected.index,
                reason = %rejected.reason,
                "Skipping malformed record"
            );
        }
        tracing::debug!(
            url = %self.config.url,
            records = decoded.records.len(),
            rejected = decoded.rejected.len(),
            "Fetched records"
        );

        Ok(decoded)
    }

    async fn mutate(&self, mutation: &Mutation) -> Result<(), GatewayError> {
        let body = mutation
            .to_body()
            .map_err(|e| GatewayError::Encode(e.to_string()))?;

        let response = self
            .client
            .post(&self.config.url)
            .header(header::CONTENT_TYPE, WRITE_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(GatewayError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        // Drain and drop; the client re-reads instead of trusting the reply
        let _ = response.bytes().await;

        tracing::info!(
            action = %mutation.kind(),
            register_number = %mutation.register_number(),
            "Mutation sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Scores;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::get,
        Router,
    };
    use std::sync::{Arc, Mutex};

    /// Bind a stub endpoint on an ephemeral port and return its URL
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/exec", addr)
    }

    fn gateway(url: String) -> HttpGateway {
        HttpGateway::new(GatewayConfig {
            url,
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_all_decodes_records() {
        let router = Router::new().route(
            "/exec",
            get(|| async {
                r#"[{"registerNumber":"0042","name":"Asha","d":8,"s":7,"c":9,"i":6,"assignment":"Essay"},
                    {"name":"broken"}]"#
            }),
        );
        let gw = gateway(spawn_stub(router).await);

        let decoded = gw.fetch_all().await.unwrap();

        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.records[0].register_number, "0042");
        assert_eq!(decoded.rejected.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_rejects_non_array() {
        let router = Router::new().route("/exec", get(|| async { r#"{"ok":true}"# }));
        let gw = gateway(spawn_stub(router).await);

        let err = gw.fetch_all().await.unwrap_err();
        assert!(matches!(err, GatewayError::Records(_)));
    }

    #[tokio::test]
    async fn test_fetch_all_status_error() {
        let router = Router::new().route(
            "/exec",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "quota exceeded") }),
        );
        let gw = gateway(spawn_stub(router).await);

        match gw.fetch_all().await.unwrap_err() {
            GatewayError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mutate_posts_action_body() {
        let seen: Arc<Mutex<Vec<(String, String)>>> = Arc::default();
        let sink = Arc::clone(&seen);

        let router = Router::new().route(
            "/exec",
            axum::routing::post(move |headers: HeaderMap, body: String| {
                let sink = Arc::clone(&sink);
                async move {
                    let content_type = headers
                        .get("content-type")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    sink.lock().unwrap().push((content_type, body));
                    "ignored"
                }
            }),
        );
        let gw = gateway(spawn_stub(router).await);

        gw.mutate(&Mutation::UpdateScore {
            register_number: "0042".to_string(),
            scores: Scores::new(1.0, 2.0, 3.0, 4.0),
        })
        .await
        .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, WRITE_CONTENT_TYPE);

        let body: serde_json::Value = serde_json::from_str(&seen[0].1).unwrap();
        assert_eq!(body["action"], "updateScore");
        assert_eq!(body["registerNumber"], "0042");
        assert_eq!(body["i"], 4.0);
    }

    #[tokio::test]
    async fn test_unreachable_gateway() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gw = gateway(format!("http://{}/exec", addr));
        let err = gw.fetch_all().await.unwrap_err();

        assert!(matches!(err, GatewayError::Unavailable));
    }
}
