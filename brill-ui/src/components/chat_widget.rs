//! AI Chat Widget
//!
//! Floating assistant button that expands into a chat panel.

use leptos::html::Div;
use leptos::*;

use crate::api;
use crate::state::{ChatLog, GlobalState, Sender};

#[component]
pub fn ChatWidget() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (open, set_open) = create_signal(false);
    let log = create_rw_signal(ChatLog::new());
    let (input, set_input) = create_signal(String::new());
    let scroll_ref = create_node_ref::<Div>();

    // Keep the newest message in view
    create_effect(move |_| {
        log.with(|log| (log.messages().len(), log.is_pending()));
        request_animation_frame(move || {
            if let Some(container) = scroll_ref.get_untracked() {
                container.set_scroll_top(container.scroll_height());
            }
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut question = None;
        log.update(|log| question = log.begin(&input.get_untracked()));
        let Some(question) = question else {
            return;
        };
        set_input.set(String::new());

        spawn_local(async move {
            match api::send_chat(&question).await {
                Ok(reply) => log.update(|log| log.complete(reply)),
                Err(e) => {
                    log.update(ChatLog::fail);
                    state.show_error(&e);
                }
            }
        });
    };

    let pending = move || log.with(ChatLog::is_pending);

    view! {
        {move || {
            if !open.get() {
                view! {
                    <button
                        on:click=move |_| set_open.set(true)
                        class="fixed bottom-6 right-6 z-50 h-14 w-14 rounded-full text-2xl text-white
                               bg-gradient-to-r from-indigo-600 to-purple-600 shadow-lg hover:shadow-xl"
                        title="AI-помощник"
                    >
                        "💬"
                    </button>
                }.into_view()
            } else {
                view! {
                    <div class="fixed bottom-6 right-6 z-50 w-96 max-w-[calc(100vw-3rem)] h-[500px]
                                bg-white rounded-2xl shadow-2xl flex flex-col animate-slide-in">
                        <div class="flex items-center justify-between px-4 py-3 rounded-t-2xl text-white
                                    bg-gradient-to-r from-indigo-600 to-purple-600">
                            <span class="font-semibold">"🤖 AI-помощник BRILL"</span>
                            <button
                                on:click=move |_| set_open.set(false)
                                class="p-1 rounded hover:bg-white/20"
                            >
                                "✕"
                            </button>
                        </div>

                        <div node_ref=scroll_ref class="flex-1 overflow-y-auto p-4 space-y-3">
                            <For
                                each=move || log.with(|log| log.messages().to_vec())
                                key=|message| message.id
                                children=move |message| {
                                    let mine = message.sender == Sender::User;
                                    view! {
                                        <div class=if mine { "flex justify-end" } else { "flex justify-start" }>
                                            <div class=if mine {
                                                "max-w-[80%] rounded-2xl px-4 py-2 bg-indigo-600 text-white"
                                            } else {
                                                "max-w-[80%] rounded-2xl px-4 py-2 bg-gray-100"
                                            }>
                                                <p class="text-sm whitespace-pre-wrap">{message.text.clone()}</p>
                                                <p class="text-xs opacity-60 mt-1">{message.time_label()}</p>
                                            </div>
                                        </div>
                                    }
                                }
                            />

                            <Show when=pending>
                                <div class="flex justify-start">
                                    <div class="bg-gray-100 rounded-2xl px-4 py-3 flex space-x-1">
                                        <span class="typing-dot" />
                                        <span class="typing-dot" />
                                        <span class="typing-dot" />
                                    </div>
                                </div>
                            </Show>
                        </div>

                        <form on:submit=on_submit class="p-3 border-t border-gray-200 flex space-x-2">
                            <input
                                type="text"
                                placeholder="Задайте вопрос..."
                                prop:value=input
                                on:input=move |ev| set_input.set(event_target_value(&ev))
                                disabled=pending
                                class="flex-1 border border-gray-300 rounded-lg px-3 py-2 text-sm
                                       focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            />
                            <button
                                type="submit"
                                disabled=move || pending() || input.with(|text| text.trim().is_empty())
                                class="px-4 rounded-lg text-white bg-indigo-600 hover:bg-indigo-700
                                       disabled:opacity-50 disabled:cursor-not-allowed"
                            >
                                "➤"
                            </button>
                        </form>
                    </div>
                }.into_view()
            }
        }}
    }
}
