//! Home View State
//!
//! Reactive state behind the dashboard, using Leptos signals. Provided once
//! at the root so it survives route changes.

use leptos::*;
use serde_json::Value;

use super::sequence::Sequencer;
use crate::api;
use crate::records::{delete_body, RecordForm, StudentRecord};

#[derive(Clone)]
pub struct HomeState {
    /// Records of the last applied fetch
    pub records: RwSignal<Vec<StudentRecord>>,
    /// Fetches in flight; the loading indicator shows while non-zero
    pub pending: RwSignal<usize>,
    /// Raw form text
    pub form: RwSignal<RecordForm>,
    /// Rows the last applied fetch had to skip
    pub rejected: RwSignal<usize>,
    /// Time of the last applied fetch
    pub last_refreshed: RwSignal<Option<String>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    sequencer: Sequencer,
}

/// The three form buttons
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubmitAction {
    Create,
    UpdateScore,
    UpdateAssignment,
}

/// Provide home state to the component tree
pub fn provide_home_state() {
    let state = HomeState {
        records: create_rw_signal(Vec::new()),
        pending: create_rw_signal(0),
        form: create_rw_signal(RecordForm::default()),
        rejected: create_rw_signal(0),
        last_refreshed: create_rw_signal(None),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        sequencer: Sequencer::new(),
    };

    provide_context(state);
}

impl HomeState {
    pub fn loading(&self) -> bool {
        self.pending.get() > 0
    }

    /// Store raw input for a form field
    pub fn set_field(&self, name: &str, value: String) {
        self.form.update(|form| form.set(name, value));
    }

    /// Fetch every record; only the newest response is applied
    pub fn refresh(&self) {
        let state = self.clone();
        let ticket = self.sequencer.begin();
        self.pending.update(|n| *n += 1);

        spawn_local(async move {
            let result = api::fetch_records().await;
            state.pending.update(|n| *n = n.saturating_sub(1));

            match result {
                Ok(decoded) => {
                    if !state.sequencer.try_apply(ticket) {
                        return;
                    }
                    if !decoded.rejected.is_empty() {
                        web_sys::console::warn_1(
                            &format!("Skipped {} malformed records", decoded.rejected.len()).into(),
                        );
                    }
                    state.rejected.set(decoded.rejected.len());
                    state.records.set(decoded.records);
                    state
                        .last_refreshed
                        .set(Some(chrono::Local::now().format("%H:%M:%S").to_string()));
                }
                Err(_) if state.sequencer.is_stale(ticket) => {}
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch records: {}", e).into());
                    state.show_error(&format!("Could not load records: {}", e));
                }
            }
        });
    }

    /// Send the form's mutation for `action`, then refresh. The form keeps
    /// its contents.
    pub fn submit(&self, action: SubmitAction) {
        let form = self.form.get_untracked();
        let body = match action {
            SubmitAction::Create => form.create_body(),
            SubmitAction::UpdateScore => form.update_score_body(),
            SubmitAction::UpdateAssignment => Ok(form.update_assignment_body()),
        };

        match body {
            Ok(body) => self.send(body, "Saved"),
            Err(e) => self.show_error(&e),
        }
    }

    /// Delete a row by its own key, bypassing the form
    pub fn delete_row(&self, register_number: &str) {
        self.send(delete_body(register_number), "Deleted");
    }

    fn send(&self, body: Value, done: &'static str) {
        let state = self.clone();
        spawn_local(async move {
            match api::post_action(&body).await {
                Ok(()) => state.show_success(done),
                Err(e) => {
                    web_sys::console::error_1(&format!("Write failed: {}", e).into());
                    state.show_error(&e);
                }
            }
            // The sheet may have changed even when the response was an error
            state.refresh();
        });
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
