//! Loading Component

use leptos::*;

/// Centered loading message with spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center space-x-3 py-8 text-white">
            <div class="loading-spinner w-6 h-6" />
            <span>"Loading..."</span>
        </div>
    }
}
