//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::export::CsvStyle;
use crate::gateway::Gateway;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Records backend every request is forwarded to
    pub gateway: Arc<dyn Gateway>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Default style for `/export` when the request names none
    pub export_style: CsvStyle,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>, config: ApiConfig) -> Self {
        Self {
            gateway,
            config: Arc::new(config),
            export_style: CsvStyle::default(),
            start_time: Instant::now(),
        }
    }

    pub fn with_export_style(mut self, style: CsvStyle) -> Self {
        self.export_style = style;
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
