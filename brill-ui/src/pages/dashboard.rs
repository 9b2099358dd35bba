//! Dashboard Page
//!
//! Customer area: balance, card transfers, products and recent operations.
//! Visitors without a stored session are sent back to the landing page.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{ChatWidget, ListSkeleton, TransferDialog};
use crate::forms::{format_currency, format_rubles};
use crate::state::{GlobalState, Transaction};

/// Operations shown before "Показать все операции"
const RECENT_LIMIT: usize = 5;
/// Upper bound accepted by the API
const ALL_LIMIT: usize = 50;

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    move || {
        if state.session.with(Option::is_some) {
            view! { <AccountView /> }.into_view()
        } else {
            view! { <Redirect path="/" /> }.into_view()
        }
    }
}

#[component]
fn AccountView() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let transfer_open = create_rw_signal(false);
    let (limit, set_limit) = create_signal(RECENT_LIMIT);
    let (refresh, set_refresh) = create_signal(0u32);

    let user_id = state.user().map(|u| u.id).unwrap_or_default();

    let history = create_local_resource(
        move || (refresh.get(), limit.get()),
        move |(_, limit)| async move {
            let result = api::fetch_transactions(user_id, limit).await;
            match &result {
                Ok(response) => state.set_balance(response.balance),
                Err(e) => web_sys::console::error_1(&format!("Failed to load operations: {}", e).into()),
            }
            result.map(|response| response.transactions)
        },
    );

    let logout = move |_| {
        state.sign_out();
        navigate("/", Default::default());
    };

    let email = move || state.user().map(|u| u.email).unwrap_or_default();
    let first_name = move || {
        state
            .user()
            .map(|u| u.first_name().to_string())
            .unwrap_or_default()
    };
    let balance = move || {
        state
            .session
            .with(|s| s.as_ref().map(|s| format_currency(s.user.balance)))
            .unwrap_or_default()
    };

    view! {
        <div class="min-h-screen bg-gray-50">
            <header class="bg-white border-b border-gray-200">
                <div class="container mx-auto px-4 h-16 flex items-center justify-between">
                    <A href="/" class="text-xl font-bold">"BRILL"</A>
                    <div class="flex items-center space-x-4">
                        <span class="text-sm text-gray-500 hidden sm:inline">{email}</span>
                        <button on:click=logout class="px-3 py-1.5 rounded-lg text-sm hover:bg-gray-100">
                            "Выйти"
                        </button>
                    </div>
                </div>
            </header>

            <main class="container mx-auto px-4 py-8 space-y-8">
                <div>
                    <h1 class="text-3xl font-bold">{move || format!("Добро пожаловать, {}!", first_name())}</h1>
                    <p class="text-gray-500 mt-1">"Управляйте своими финансами в одном месте"</p>
                </div>

                <div class="grid lg:grid-cols-3 gap-6">
                    // Balance
                    <div class="lg:col-span-2 rounded-2xl p-8 text-white bg-gradient-to-br from-indigo-600 to-purple-600">
                        <p class="text-white/80">"Общий баланс"</p>
                        <p class="text-5xl font-bold mt-2">{balance}</p>
                        <div class="flex gap-4 mt-8">
                            <button class="flex-1 py-3 rounded-lg bg-white/20 hover:bg-white/30 font-medium">
                                "↗ Пополнить"
                            </button>
                            <button
                                on:click=move |_| transfer_open.set(true)
                                class="flex-1 py-3 rounded-lg bg-white/20 hover:bg-white/30 font-medium"
                            >
                                "↘ Перевести"
                            </button>
                        </div>
                    </div>

                    // Card
                    <div class="rounded-2xl bg-white border border-gray-200 p-6 flex flex-col">
                        <p class="font-semibold">"Моя карта"</p>
                        <div class="flex-1 my-4 rounded-xl p-4 text-white bg-gradient-to-r from-gray-800 to-gray-900">
                            <p class="text-sm opacity-70">"BRILL"</p>
                            <p class="text-lg tracking-widest mt-6">"•••• 4242"</p>
                        </div>
                        <button class="w-full py-2 rounded-lg border border-gray-300 hover:bg-gray-50">
                            "Заказать карту"
                        </button>
                    </div>
                </div>

                <div class="grid md:grid-cols-3 gap-6">
                    <ProductTile icon="🐷" title="Вклады" caption="До 18% годовых" />
                    <ProductTile icon="📈" title="Инвестиции" caption="Начните инвестировать" />
                    <ProductTile icon="🛡" title="Страхование" caption="Защитите своё имущество" />
                </div>

                // Recent operations
                <div class="rounded-2xl bg-white border border-gray-200 p-6">
                    <h2 class="text-xl font-semibold">"Последние операции"</h2>
                    <p class="text-sm text-gray-500 mb-6">"История ваших транзакций"</p>

                    <Transition fallback=move || view! { <ListSkeleton count=3 /> }>
                        {move || history.get().map(|result| match result {
                            Ok(transactions) if transactions.is_empty() => view! {
                                <p class="text-center text-gray-500 py-8">"Операций пока нет"</p>
                            }.into_view(),
                            Ok(transactions) => view! {
                                <div class="divide-y divide-gray-100">
                                    {transactions.into_iter().map(|tx| view! { <OperationRow tx=tx /> }).collect_view()}
                                </div>
                            }.into_view(),
                            Err(e) => view! {
                                <p class="text-center text-red-500 py-8">{e}</p>
                            }.into_view(),
                        })}
                    </Transition>

                    <Show when=move || { limit.get() < ALL_LIMIT }>
                        <button
                            on:click=move |_| set_limit.set(ALL_LIMIT)
                            class="w-full mt-6 py-2 rounded-lg border border-gray-300 hover:bg-gray-50"
                        >
                            "Показать все операции"
                        </button>
                    </Show>
                </div>
            </main>

            <TransferDialog
                open=transfer_open
                on_complete=move |_| set_refresh.update(|n| *n += 1)
            />
            <ChatWidget />
        </div>
    }
}

#[component]
fn ProductTile(icon: &'static str, title: &'static str, caption: &'static str) -> impl IntoView {
    view! {
        <div class="rounded-2xl bg-white border border-gray-200 p-6 flex items-center space-x-4
                    hover:shadow-lg transition-shadow">
            <div class="w-12 h-12 rounded-xl bg-indigo-50 flex items-center justify-center text-2xl">{icon}</div>
            <div>
                <p class="font-semibold">{title}</p>
                <p class="text-sm text-gray-500">{caption}</p>
            </div>
        </div>
    }
}

#[component]
fn OperationRow(tx: Transaction) -> impl IntoView {
    let income = tx.is_income();
    let (sign, amount_class, icon) = if income {
        ("+", "font-semibold text-green-600", "↓")
    } else {
        ("-", "font-semibold text-red-600", "↑")
    };

    view! {
        <div class="flex items-center justify-between py-3">
            <div class="flex items-center space-x-3">
                <div class="w-10 h-10 rounded-full bg-gray-100 flex items-center justify-center">{icon}</div>
                <div>
                    <p class="font-medium">{tx.description.clone()}</p>
                    <p class="text-sm text-gray-500">{tx.date_label()}</p>
                </div>
            </div>
            <span class=amount_class>{format!("{}{} ₽", sign, format_rubles(tx.amount))}</span>
        </div>
    }
}
