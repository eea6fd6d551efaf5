//! Home View
//!
//! State and orchestration behind the dashboard page, independent of how it
//! is drawn. The Leptos page and the CLI both follow the same sequence:
//!
//! 1. mount: mark loading, fetch every record, replace the list
//! 2. edit: store raw form text, nothing else
//! 3. submit or row delete: send one mutation, then repeat step 1
//!
//! The record list is a disposable copy of the gateway's data. Responses
//! from overlapping fetches are ordered with a [`RequestSequencer`], so an
//! older read never overwrites a newer one.

mod table;

pub use table::{TableRow, TableView, EMPTY_MESSAGE, TABLE_HEADER};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::export::{build_csv, CsvExport, CsvStyle, ExportError};
use crate::gateway::{Gateway, GatewayError};
use crate::records::{FormError, Mutation, RecordForm, RejectedRecord, StudentRecord};
use crate::sequencing::RequestSequencer;

/// Snapshot of everything the view renders
#[derive(Debug, Clone, Default, Serialize)]
pub struct HomeState {
    pub records: Vec<StudentRecord>,
    pub loading: bool,
    pub form: RecordForm,
    /// Rows of the last applied fetch that failed validation
    pub rejected: Vec<RejectedRecord>,
    /// Message of the most recent failure, cleared by the next good fetch
    pub last_error: Option<String>,
    pub last_refreshed: Option<DateTime<Utc>>,
    #[serde(skip)]
    pending_fetches: usize,
}

/// The three form buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Create,
    UpdateScore,
    UpdateAssignment,
}

impl SubmitAction {
    fn build(&self, form: &RecordForm) -> Result<Mutation, FormError> {
        match self {
            SubmitAction::Create => form.create(),
            SubmitAction::UpdateScore => form.update_score(),
            SubmitAction::UpdateAssignment => Ok(form.update_assignment()),
        }
    }
}

/// What happened to a fetch response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Response replaced the record list
    Applied { records: usize, rejected: usize },
    /// A newer response was already applied; this one was dropped
    Stale,
}

#[derive(Error, Debug)]
pub enum HomeError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Drives the Home view against a gateway
pub struct HomeController<G: Gateway + ?Sized> {
    gateway: Arc<G>,
    state: RwLock<HomeState>,
    sequencer: RequestSequencer,
    export_style: CsvStyle,
}

impl<G: Gateway + ?Sized> HomeController<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: RwLock::new(HomeState::default()),
            sequencer: RequestSequencer::new(),
            export_style: CsvStyle::default(),
        }
    }

    pub fn with_export_style(mut self, style: CsvStyle) -> Self {
        self.export_style = style;
        self
    }

    pub async fn snapshot(&self) -> HomeState {
        self.state.read().await.clone()
    }

    pub async fn records(&self) -> Vec<StudentRecord> {
        self.state.read().await.records.clone()
    }

    pub async fn table(&self) -> TableView {
        TableView::from_records(&self.state.read().await.records)
    }

    /// Fetch every record and replace the list if this is the newest response
    pub async fn refresh(&self) -> Result<RefreshOutcome, HomeError> {
        let ticket = self.sequencer.begin();
        {
            let mut state = self.state.write().await;
            state.pending_fetches += 1;
            state.loading = true;
        }

        let result = self.gateway.fetch_all().await;

        let mut state = self.state.write().await;
        state.pending_fetches = state.pending_fetches.saturating_sub(1);
        state.loading = state.pending_fetches > 0;

        match result {
            Ok(decoded) => {
                // Checked under the state lock so applies happen in ticket order
                if !self.sequencer.try_apply(ticket) {
                    tracing::debug!(ticket = ticket.value(), "Dropping stale fetch response");
                    return Ok(RefreshOutcome::Stale);
                }

                let outcome = RefreshOutcome::Applied {
                    records: decoded.records.len(),
                    rejected: decoded.rejected.len(),
                };
                state.records = decoded.records;
                state.rejected = decoded.rejected;
                state.last_error = None;
                state.last_refreshed = Some(Utc::now());
                Ok(outcome)
            }
            Err(e) if ticket.value() <= self.sequencer.latest_applied() => {
                tracing::debug!(ticket = ticket.value(), error = %e, "Dropping stale fetch failure");
                Ok(RefreshOutcome::Stale)
            }
            Err(e) => {
                tracing::error!(gateway = self.gateway.name(), error = %e, "Fetch failed");
                state.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Store raw input for a form field
    pub async fn set_field(&self, name: &str, value: impl Into<String>) -> Result<(), HomeError> {
        self.state.write().await.form.set_field(name, value)?;
        Ok(())
    }

    /// Send the mutation for a form button, then refresh.
    ///
    /// The form keeps its contents afterwards.
    pub async fn submit(&self, action: SubmitAction) -> Result<RefreshOutcome, HomeError> {
        let built = {
            let state = self.state.read().await;
            action.build(&state.form)
        };

        match built {
            Ok(mutation) => self.send(mutation).await,
            Err(e) => {
                tracing::warn!(error = %e, "Form rejected");
                self.state.write().await.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Delete the row with this key, bypassing the form, then refresh
    pub async fn delete_row(&self, register_number: &str) -> Result<RefreshOutcome, HomeError> {
        self.send(Mutation::delete(register_number)).await
    }

    /// Refreshes whether or not the write succeeded: a failed request may
    /// still have reached the sheet.
    async fn send(&self, mutation: Mutation) -> Result<RefreshOutcome, HomeError> {
        let sent = self.gateway.mutate(&mutation).await;
        let refreshed = self.refresh().await;

        match sent {
            Ok(()) => refreshed,
            Err(e) => {
                tracing::error!(
                    action = %mutation.kind(),
                    register_number = %mutation.register_number(),
                    error = %e,
                    "Mutation failed"
                );
                self.state.write().await.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Build the CSV download for the records currently shown
    pub async fn export(&self) -> Result<Option<CsvExport>, HomeError> {
        let state = self.state.read().await;
        let export = build_csv(&state.records, self.export_style)?;

        if export.is_none() {
            tracing::debug!("Nothing to export");
        }
        Ok(export)
    }
}
