//! Home Page
//!
//! Student performance dashboard: the form, the export button and the
//! records table.

use leptos::*;

use crate::components::{Loading, Nav, RecordsTable, StudentForm};
use crate::export::{build_csv, download_csv};
use crate::state::HomeState;

#[component]
pub fn Home() -> impl IntoView {
    let state = use_context::<HomeState>().expect("HomeState not found");

    // Fetch records on mount
    state.refresh();

    let export_state = state.clone();
    let on_export = move |_| {
        let Some(csv) = export_state.records.with_untracked(|records| build_csv(records)) else {
            return;
        };
        if let Err(e) = download_csv(&csv) {
            web_sys::console::error_1(&format!("Export failed: {}", e).into());
            export_state.show_error("Could not start the download");
        }
    };

    let status_state = state.clone();
    let loading_state = state.clone();

    view! {
        <Nav />

        <section class="pt-28 pb-16 px-4 min-h-screen">
            <div class="max-w-7xl mx-auto">
                <h2 class="text-3xl font-bold text-center text-white mb-10">
                    "📊 Student Performance Dashboard"
                </h2>

                <StudentForm />

                <div class="flex items-center justify-between mb-4">
                    <div class="text-sm text-gray-400">
                        {move || {
                            let refreshed = status_state
                                .last_refreshed
                                .get()
                                .map(|t| format!("Updated {}", t))
                                .unwrap_or_default();
                            match status_state.rejected.get() {
                                0 => refreshed,
                                n => format!("{} · {} malformed rows skipped", refreshed, n),
                            }
                        }}
                    </div>
                    <button
                        on:click=on_export
                        class="bg-gradient-to-r from-yellow-400 to-orange-500 text-black font-semibold px-6 py-2 rounded-full hover:scale-105 transition"
                    >
                        "⬇ Download Excel"
                    </button>
                </div>

                <div class="bg-white/10 backdrop-blur-xl border border-white/20 rounded-2xl shadow-xl overflow-x-auto">
                    {move || {
                        if loading_state.loading() {
                            view! { <Loading /> }.into_view()
                        } else {
                            view! { <RecordsTable /> }.into_view()
                        }
                    }}
                </div>
            </div>
        </section>
    }
}
