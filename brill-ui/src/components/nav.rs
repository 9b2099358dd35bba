//! Navigation Component
//!
//! Landing page header with section links and the sign-in entry point.

use leptos::*;
use leptos_router::*;

use crate::content::NAV_LINKS;
use crate::state::GlobalState;

/// Smoothly scroll the page to the element with `id`
pub fn scroll_to_section(id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
    else {
        return;
    };

    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Fixed header for the landing page
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (mobile_menu_open, set_mobile_menu_open) = create_signal(false);

    let go = move |id: &'static str| {
        set_mobile_menu_open.set(false);
        scroll_to_section(id);
    };

    view! {
        <nav class="fixed top-0 inset-x-0 z-40 bg-white/80 backdrop-blur border-b border-gray-200">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <button on:click=move |_| go("hero") class="flex items-center space-x-2">
                        <span class="w-9 h-9 rounded-lg bg-gradient-to-r from-indigo-600 to-purple-600
                                     text-white font-bold flex items-center justify-center">"B"</span>
                        <span class="text-xl font-bold">"BRILL"</span>
                    </button>

                    // Desktop navigation
                    <div class="hidden md:flex items-center space-x-8">
                        {NAV_LINKS.iter().map(|&(label, id)| view! {
                            <button
                                on:click=move |_| go(id)
                                class="text-sm font-medium hover:text-indigo-600 transition-colors"
                            >
                                {label}
                            </button>
                        }).collect_view()}
                    </div>

                    <div class="flex items-center space-x-3">
                        <AccountButton state=state />

                        // Mobile menu button
                        <button
                            class="md:hidden p-2 rounded-lg hover:bg-gray-100"
                            on:click=move |_| set_mobile_menu_open.update(|v| *v = !*v)
                        >
                            {move || if mobile_menu_open.get() { "✕" } else { "☰" }}
                        </button>
                    </div>
                </div>

                // Mobile navigation
                {move || {
                    if mobile_menu_open.get() {
                        view! {
                            <div class="md:hidden pb-4 flex flex-col space-y-2">
                                {NAV_LINKS.iter().map(|&(label, id)| view! {
                                    <button
                                        on:click=move |_| go(id)
                                        class="text-left px-3 py-2 rounded-lg hover:bg-gray-100"
                                    >
                                        {label}
                                    </button>
                                }).collect_view()}
                            </div>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>
        </nav>
    }
}

/// Sign-in buttons for visitors, a dashboard link for signed-in customers
#[component]
fn AccountButton(state: GlobalState) -> impl IntoView {
    move || {
        if state.session.with(Option::is_some) {
            view! {
                <A
                    href="/dashboard"
                    class="px-4 py-2 rounded-lg text-sm font-medium text-white
                           bg-gradient-to-r from-indigo-600 to-purple-600 hover:opacity-90"
                >
                    "Личный кабинет"
                </A>
            }.into_view()
        } else {
            view! {
                <button
                    on:click=move |_| state.auth_open.set(true)
                    class="hidden sm:inline px-4 py-2 rounded-lg text-sm font-medium border
                           border-gray-300 hover:bg-gray-50"
                >
                    "Войти"
                </button>
                <button
                    on:click=move |_| state.auth_open.set(true)
                    class="px-4 py-2 rounded-lg text-sm font-medium text-white
                           bg-gradient-to-r from-indigo-600 to-purple-600 hover:opacity-90"
                >
                    "Открыть счёт"
                </button>
            }.into_view()
        }
    }
}
