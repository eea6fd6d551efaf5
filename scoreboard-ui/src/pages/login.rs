//! Login page shell. Nothing is submitted anywhere.

use leptos::*;
use leptos_router::*;

#[component]
pub fn Login() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center px-4">
            <div class="w-full max-w-md bg-white/10 border border-white/20 rounded-2xl p-8 shadow-xl">
                <h1 class="text-3xl font-bold text-white mb-2">"Login"</h1>
                <p class="text-gray-400 mb-6">"Welcome back to Scoreboard"</p>
                <form class="space-y-4" on:submit=|ev| ev.prevent_default()>
                    <div>
                        <label for="email" class="block text-sm text-gray-400 mb-2">"Email"</label>
                        <input type="email" id="email" name="email" placeholder="you@example.com"
                            class="w-full bg-black/40 text-white rounded-lg px-4 py-2 border border-white/20" />
                    </div>
                    <div>
                        <label for="password" class="block text-sm text-gray-400 mb-2">"Password"</label>
                        <input type="password" id="password" name="password" placeholder="••••••••"
                            class="w-full bg-black/40 text-white rounded-lg px-4 py-2 border border-white/20" />
                    </div>
                    <button type="submit" class="w-full bg-cyan-600 hover:bg-cyan-700 rounded-lg py-3 font-semibold text-white">
                        "Sign In"
                    </button>
                </form>
                <p class="text-gray-400 mt-6">
                    "Don't have an account? "<A href="/register" class="text-cyan-400">"Sign up"</A>
                </p>
                <A href="/home" class="block text-gray-400 mt-2">"← Go to dashboard"</A>
            </div>
        </div>
    }
}
