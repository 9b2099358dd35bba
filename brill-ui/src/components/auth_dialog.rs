//! Auth Dialog Component
//!
//! Modal with login and registration tabs. A successful attempt stores the
//! session and opens the dashboard.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::GlobalState;

#[derive(Clone, Copy, PartialEq)]
enum AuthTab {
    Login,
    Register,
}

/// Sign-in modal, visible while `GlobalState::auth_open` is set
#[component]
pub fn AuthDialog() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (tab, set_tab) = create_signal(AuthTab::Login);

    view! {
        <Show when=move || state.auth_open.get()>
            <div
                class="fixed inset-0 z-50 bg-black/50 flex items-center justify-center p-4"
                on:click=move |_| state.auth_open.set(false)
            >
                <div
                    class="bg-white rounded-2xl shadow-2xl w-full max-w-md p-6 animate-slide-in"
                    on:click=|ev| ev.stop_propagation()
                >
                    <div class="flex items-start justify-between mb-4">
                        <div>
                            <h2 class="text-2xl font-bold">"Добро пожаловать в BRILL"</h2>
                            <p class="text-sm text-gray-500 mt-1">"Войдите или создайте новый аккаунт"</p>
                        </div>
                        <button
                            class="p-1 rounded hover:bg-gray-100 text-gray-500"
                            on:click=move |_| state.auth_open.set(false)
                        >
                            "✕"
                        </button>
                    </div>

                    // Tabs
                    <div class="grid grid-cols-2 bg-gray-100 rounded-lg p-1 mb-6">
                        <TabButton label="Вход" current=tab target=AuthTab::Login
                            on_click=move |_| set_tab.set(AuthTab::Login) />
                        <TabButton label="Регистрация" current=tab target=AuthTab::Register
                            on_click=move |_| set_tab.set(AuthTab::Register) />
                    </div>

                    {move || match tab.get() {
                        AuthTab::Login => view! { <AuthForm tab=AuthTab::Login /> }.into_view(),
                        AuthTab::Register => view! { <AuthForm tab=AuthTab::Register /> }.into_view(),
                    }}
                </div>
            </div>
        </Show>
    }
}

#[component]
fn TabButton(
    label: &'static str,
    current: ReadSignal<AuthTab>,
    target: AuthTab,
    on_click: impl Fn(web_sys::MouseEvent) + 'static,
) -> impl IntoView {
    view! {
        <button
            type="button"
            on:click=on_click
            class=move || if current.get() == target {
                "py-2 rounded-md text-sm font-medium bg-white shadow"
            } else {
                "py-2 rounded-md text-sm font-medium text-gray-500"
            }
        >
            {label}
        </button>
    }
}

#[component]
fn AuthForm(tab: AuthTab) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (full_name, set_full_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }

        let (name, mail, pass) = (full_name.get(), email.get(), password.get());
        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = match tab {
                AuthTab::Login => api::login(&mail, &pass).await,
                AuthTab::Register => api::register(&mail, &pass, &name).await,
            };

            match result {
                Ok(session) => {
                    state.sign_in(session);
                    state.auth_open.set(false);
                    state.show_success(match tab {
                        AuthTab::Login => "Вы вошли в систему",
                        AuthTab::Register => "Регистрация прошла успешно",
                    });
                    navigate("/dashboard", Default::default());
                }
                Err(e) => state.show_error(&e),
            }
            set_submitting.set(false);
        });
    };

    let (idle_label, busy_label) = match tab {
        AuthTab::Login => ("Войти", "Вход..."),
        AuthTab::Register => ("Создать аккаунт", "Регистрация..."),
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            {(tab == AuthTab::Register).then(|| view! {
                <Field label="ФИО">
                    <input
                        type="text"
                        required
                        placeholder="Иван Иванов"
                        prop:value=full_name
                        on:input=move |ev| set_full_name.set(event_target_value(&ev))
                        class=INPUT_CLASS
                    />
                </Field>
            })}

            <Field label="Email">
                <input
                    type="email"
                    required
                    placeholder="your@email.com"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    class=INPUT_CLASS
                />
            </Field>

            <Field label="Пароль">
                <input
                    type="password"
                    required
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class=INPUT_CLASS
                />
            </Field>

            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full py-3 rounded-lg font-semibold text-white bg-gradient-to-r
                       from-indigo-600 to-purple-600 hover:opacity-90 disabled:opacity-60
                       disabled:cursor-not-allowed flex items-center justify-center space-x-2"
            >
                {move || if submitting.get() {
                    view! {
                        <div class="loading-spinner w-5 h-5" />
                        <span>{busy_label}</span>
                    }.into_view()
                } else {
                    view! { <span>{idle_label}</span> }.into_view()
                }}
            </button>
        </form>
    }
}

pub(crate) const INPUT_CLASS: &str =
    "w-full border border-gray-300 rounded-lg px-3 py-2 focus:outline-none \
     focus:ring-2 focus:ring-indigo-500";

/// Labelled form row
#[component]
pub(crate) fn Field(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <label class="block space-y-1">
            <span class="text-sm font-medium text-gray-700">{label}</span>
            {children()}
        </label>
    }
}
