//! Transfer Dialog Component
//!
//! Card transfer form on the dashboard.

use leptos::*;

use super::auth_dialog::{Field, INPUT_CLASS};
use crate::api;
use crate::forms::{format_card_input, format_rubles, validate_transfer, CARD_INPUT_MAX_LEN};
use crate::state::GlobalState;

/// Modal transfer form; `on_complete` runs after a successful transfer
#[component]
pub fn TransferDialog(
    open: RwSignal<bool>,
    #[prop(into)]
    on_complete: Callback<()>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (card, set_card) = create_signal(String::new());
    let (amount, set_amount) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let close = move || {
        open.set(false);
        set_card.set(String::new());
        set_amount.set(String::new());
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let Some(user) = state.user() else {
            return;
        };

        let transfer = match validate_transfer(&card.get_untracked(), &amount.get_untracked()) {
            Ok(transfer) => transfer,
            Err(message) => {
                state.show_error(message);
                return;
            }
        };

        set_submitting.set(true);
        spawn_local(async move {
            match api::transfer(user.id, &transfer.card, transfer.amount).await {
                Ok(response) => {
                    state.set_balance(response.new_balance);
                    state.show_success(&format!("Успешно! {}", response.message));
                    close();
                    on_complete.call(());
                }
                Err(e) => state.show_error(&e),
            }
            set_submitting.set(false);
        });
    };

    let available = move || {
        state
            .session
            .with(|s| s.as_ref().map(|s| format_rubles(s.user.balance)))
            .unwrap_or_default()
    };

    view! {
        <Show when=move || open.get()>
            <div
                class="fixed inset-0 z-50 bg-black/50 flex items-center justify-center p-4"
                on:click=move |_| close()
            >
                <div
                    class="bg-white rounded-2xl shadow-2xl w-full max-w-md p-6 animate-slide-in"
                    on:click=|ev| ev.stop_propagation()
                >
                    <h2 class="text-2xl font-bold">"Перевод на карту"</h2>
                    <p class="text-sm text-gray-500 mt-1 mb-6">
                        "Переведите деньги на любую карту Сбербанка или другого банка"
                    </p>

                    <form on:submit=on_submit class="space-y-4">
                        <Field label="Номер карты получателя">
                            <input
                                type="text"
                                inputmode="numeric"
                                placeholder="1234 5678 9012 3456"
                                maxlength=CARD_INPUT_MAX_LEN
                                prop:value=card
                                on:input=move |ev| set_card.set(format_card_input(&event_target_value(&ev)))
                                class=INPUT_CLASS
                            />
                        </Field>

                        <Field label="Сумма перевода (₽)">
                            <input
                                type="number"
                                min="0"
                                step="0.01"
                                placeholder="1000"
                                prop:value=amount
                                on:input=move |ev| set_amount.set(event_target_value(&ev))
                                class=INPUT_CLASS
                            />
                        </Field>

                        <div class="bg-indigo-50 rounded-lg p-4 text-sm space-y-1">
                            <p class="font-medium">{move || format!("Доступно: {} ₽", available())}</p>
                            <p class="text-gray-500">
                                "Переводы на карты других банков — без комиссии до 100 000₽/мес"
                            </p>
                        </div>

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
                                    <span>"Отправка..."</span>
                                }.into_view()
                            } else {
                                view! { <span>"Перевести"</span> }.into_view()
                            }}
                        </button>
                    </form>
                </div>
            </div>
        </Show>
    }
}
