//! Navigation Component
//!
//! Header navigation bar with brand and links.

use leptos::*;
use leptos_router::*;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="fixed top-0 left-0 right-0 z-40 bg-gray-900/80 backdrop-blur border-b border-white/10">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/home" class="flex items-center space-x-3">
                        <span class="text-2xl">"📊"</span>
                        <span class="text-xl font-bold text-white">"Scoreboard"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <NavLink href="/home" label="Dashboard" />
                        <NavLink href="/login" label="Login" />
                        <NavLink href="/register" label="Register" />
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-white/10 transition-colors"
            active_class="bg-white/10 text-white"
        >
            {label}
        </A>
    }
}
