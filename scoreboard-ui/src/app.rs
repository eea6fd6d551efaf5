//! App Root Component
//!
//! Routing and the shared home state.

use leptos::*;
use leptos_router::*;

use crate::components::Toast;
use crate::pages::{Home, Login, Register};
use crate::state::provide_home_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_home_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gradient-to-br from-[#0b0f14] via-[#0e1420] to-black text-white">
                <Routes>
                    <Route path="/login" view=Login />
                    <Route path="/register" view=Register />
                    <Route path="/home" view=Home />
                    <Route path="/*any" view=NotFound />
                </Routes>

                <Toast />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/home"
                class="px-6 py-3 bg-cyan-600 hover:bg-cyan-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
