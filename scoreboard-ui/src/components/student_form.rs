//! Student Form Component
//!
//! Seven text inputs and the three write buttons. Inputs hold raw text; the
//! numbers are coerced only when a button is pressed.

use leptos::*;

use crate::records::FORM_FIELDS;
use crate::state::{HomeState, SubmitAction};

#[component]
pub fn StudentForm() -> impl IntoView {
    let state = use_context::<HomeState>().expect("HomeState not found");

    // Assignment sits on its own full-width row
    let (score_fields, assignment) = FORM_FIELDS.split_at(FORM_FIELDS.len() - 1);
    let (name, placeholder) = assignment[0];

    view! {
        <div class="bg-white/10 backdrop-blur-xl border border-white/20 rounded-2xl p-6 mb-8 shadow-xl">
            <h3 class="text-white text-lg font-semibold mb-4">"Manage Student Data"</h3>

            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {score_fields
                    .iter()
                    .map(|&(name, placeholder)| view! {
                        <FormInput name=name placeholder=placeholder wide=false />
                    })
                    .collect_view()}
                <FormInput name=name placeholder=placeholder wide=true />
            </div>

            <div class="flex flex-wrap justify-center gap-4 mt-6">
                <ActionButton
                    label="➕ Create"
                    action=SubmitAction::Create
                    class="from-green-500 to-emerald-600"
                    state=state.clone()
                />
                <ActionButton
                    label="🔄 Update Score"
                    action=SubmitAction::UpdateScore
                    class="from-blue-500 to-cyan-600"
                    state=state.clone()
                />
                <ActionButton
                    label="✏️ Update Assignment"
                    action=SubmitAction::UpdateAssignment
                    class="from-purple-500 to-pink-600"
                    state=state
                />
            </div>
        </div>
    }
}

#[component]
fn FormInput(
    name: &'static str,
    placeholder: &'static str,
    wide: bool,
) -> impl IntoView {
    let state = use_context::<HomeState>().expect("HomeState not found");
    let form = state.form;

    let class = if wide {
        "col-span-2 md:col-span-4 bg-black/40 text-white placeholder-gray-400 border border-white/20 \
         rounded-lg px-4 py-2 focus:outline-none focus:ring-2 focus:ring-purple-400"
    } else {
        "bg-black/40 text-white placeholder-gray-400 border border-white/20 rounded-lg px-4 py-2 \
         focus:outline-none focus:ring-2 focus:ring-cyan-400"
    };

    view! {
        <input
            type="text"
            name=name
            placeholder=placeholder
            prop:value=move || form.with(|f| field_value(f, name))
            on:input=move |ev| state.set_field(name, event_target_value(&ev))
            class=class
        />
    }
}

fn field_value(form: &crate::records::RecordForm, name: &str) -> String {
    match name {
        "registerNumber" => form.register_number.clone(),
        "name" => form.name.clone(),
        "d" => form.d.clone(),
        "s" => form.s.clone(),
        "c" => form.c.clone(),
        "i" => form.i.clone(),
        "assignment" => form.assignment.clone(),
        _ => String::new(),
    }
}

#[component]
fn ActionButton(
    label: &'static str,
    action: SubmitAction,
    class: &'static str,
    state: HomeState,
) -> impl IntoView {
    view! {
        <button
            type="button"
            on:click=move |_| state.submit(action)
            class=format!(
                "bg-gradient-to-r {} text-white px-6 py-2 rounded-full hover:scale-105 transition",
                class
            )
        >
            {label}
        </button>
    }
}
