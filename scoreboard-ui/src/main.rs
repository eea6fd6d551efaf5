//! Scoreboard Dashboard
//!
//! Student score dashboard built with Leptos (WASM).
//!
//! # Architecture
//!
//! A client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! It reads and writes records over HTTP, either directly against the remote
//! records endpoint or through the `scoreboard-api` proxy.

use leptos::*;

mod api;
mod app;
mod components;
mod export;
mod pages;
mod records;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
