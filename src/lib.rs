//! # Scoreboard
//!
//! Student score dashboard over a spreadsheet-backed records endpoint. One
//! remote URL answers a `GET` with every record and a `POST` with one of four
//! write actions; this crate is the client side of that protocol.
//!
//! ## Modules
//!
//! - [`records`]: Record model, validating decode, form coercion, mutations
//! - [`gateway`]: The remote endpoint behind a trait, over HTTP or in memory
//! - [`home`]: Dashboard state: fetch, submit, delete, refresh ordering
//! - [`export`]: `student_scores.csv` generation
//! - [`api`]: Local pass-through proxy with Axum
//! - [`config`]: TOML file plus `SCOREBOARD_*` environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scoreboard::config::GatewayConfig;
//! use scoreboard::gateway::HttpGateway;
//! use scoreboard::home::{HomeController, SubmitAction};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = Arc::new(HttpGateway::new(GatewayConfig::default())?);
//!     let home = HomeController::new(gateway);
//!
//!     // Mount
//!     home.refresh().await?;
//!
//!     // Fill the form and create a record
//!     home.set_field("registerNumber", "0042").await?;
//!     home.set_field("name", "Asha").await?;
//!     home.set_field("d", "8").await?;
//!     home.submit(SubmitAction::Create).await?;
//!
//!     println!("{}", home.table().await.render_text());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod export;
pub mod gateway;
pub mod home;
pub mod logging;
pub mod records;
pub mod sequencing;

// Re-export top-level types for convenience
pub use records::{
    decode_records, DecodedRecords, FormError, FormField, Mutation, MutationKind, RecordError,
    RecordForm, RejectedRecord, Scores, StudentRecord,
};

pub use gateway::{Gateway, GatewayError, HttpGateway, InMemoryGateway};

pub use home::{HomeController, HomeError, HomeState, RefreshOutcome, SubmitAction, TableView};

pub use export::{build_csv, CsvExport, CsvStyle, ExportError};

pub use sequencing::{RequestSequencer, Ticket};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    ApiConfig, Config, ConfigError, ExportConfig, GatewayConfig, LoggingConfig,
};
