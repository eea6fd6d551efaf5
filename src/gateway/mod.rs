//! Records Gateway
//!
//! The remote endpoint that stores student records. It is the single source
//! of truth: the client reads the full set, sends one write at a time, and
//! re-reads to observe the effect.
//!
//! ## Implementations
//!
//! - [`HttpGateway`]: talks to the configured endpoint over HTTP
//! - [`InMemoryGateway`]: process-local store with the same action semantics

mod http;
mod memory;

pub use http::HttpGateway;
pub use memory::InMemoryGateway;

use async_trait::async_trait;
use thiserror::Error;

use crate::records::{DecodedRecords, Mutation, RecordError};

/// Contract shared by every records backend
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &str;

    /// Read the complete record set
    async fn fetch_all(&self) -> Result<DecodedRecords, GatewayError>;

    /// Send one write. The response carries nothing the client uses.
    async fn mutate(&self, mutation: &Mutation) -> Result<(), GatewayError>;
}

/// Errors that can occur when talking to the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gateway error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid record document: {0}")]
    Records(#[from] RecordError),

    #[error("Could not encode request: {0}")]
    Encode(String),
}

impl GatewayError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_connect() {
            GatewayError::Unavailable
        } else {
            GatewayError::Request(e)
        }
    }
}
