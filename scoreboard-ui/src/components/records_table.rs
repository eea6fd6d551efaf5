//! Records Table Component
//!
//! One row per record with a delete button, or a single "No Records Found"
//! row spanning all eight columns.

use leptos::*;

use crate::records::StudentRecord;
use crate::state::HomeState;

pub const TABLE_HEADER: [&str; 8] = ["Reg", "Name", "D", "S", "C", "I", "Assignment", "Action"];

#[component]
pub fn RecordsTable() -> impl IntoView {
    let state = use_context::<HomeState>().expect("HomeState not found");
    let records = state.records;

    view! {
        <table class="min-w-full text-sm text-white">
            <thead class="bg-white/10 text-cyan-300">
                <tr>
                    {TABLE_HEADER
                        .iter()
                        .map(|h| view! { <th class="px-4 py-3 text-left">{*h}</th> })
                        .collect_view()}
                </tr>
            </thead>

            <tbody>
                {move || {
                    let rows = records.get();
                    if rows.is_empty() {
                        view! {
                            <tr>
                                <td colspan={TABLE_HEADER.len().to_string()} class="text-center py-8 text-gray-400">
                                    "No Records Found"
                                </td>
                            </tr>
                        }
                        .into_view()
                    } else {
                        rows.into_iter()
                            .map(|record| view! { <RecordRow record=record state=state.clone() /> })
                            .collect_view()
                    }
                }}
            </tbody>
        </table>
    }
}

#[component]
fn RecordRow(record: StudentRecord, state: HomeState) -> impl IntoView {
    let [d, s, c, i] = record.score_cells();
    let key = record.register_number.clone();

    view! {
        <tr class="border-t border-white/10 hover:bg-white/5 transition">
            <td class="px-4 py-3">{record.register_number}</td>
            <td class="px-4 py-3">{record.name}</td>
            <td class="px-4 py-3">{d}</td>
            <td class="px-4 py-3">{s}</td>
            <td class="px-4 py-3">{c}</td>
            <td class="px-4 py-3">{i}</td>
            <td class="px-4 py-3 text-pink-400 font-medium">{record.assignment}</td>
            <td class="px-4 py-3">
                <button
                    on:click=move |_| state.delete_row(&key)
                    class="bg-red-500/20 text-red-400 border border-red-500/30 px-4 py-1 rounded-full hover:bg-red-500/40 transition"
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
