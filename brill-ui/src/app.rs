//! App Root Component
//!
//! Routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::Toast;
use crate::pages::{Dashboard, Landing};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-white text-gray-900">
                <Routes>
                    <Route path="/" view=Landing />
                    <Route path="/dashboard" view=Dashboard />
                    <Route path="/*any" view=NotFound />
                </Routes>

                <Toast />
            </div>
        </Router>
    }
}

/// 404 page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col items-center justify-center space-y-4">
            <h1 class="text-6xl font-bold text-indigo-600">"404"</h1>
            <p class="text-gray-500">"Страница не найдена"</p>
            <A href="/" class="text-indigo-600 hover:underline">"На главную"</A>
        </div>
    }
}
