//! Landing Page
//!
//! Public site: hero, services, FAQ, about and footer.

use leptos::*;

use crate::components::nav::scroll_to_section;
use crate::components::{AuthDialog, ChatWidget, Nav};
use crate::content::{FAQS, FOOTER_COLUMNS, PILLARS, SERVICES, STATS, WHY_BRILL};
use crate::state::GlobalState;

#[component]
pub fn Landing() -> impl IntoView {
    view! {
        <Nav />
        <main class="pt-16">
            <Hero />
            <Services />
            <FaqSection />
            <About />
        </main>
        <Footer />
        <AuthDialog />
        <ChatWidget />
    }
}

#[component]
fn Hero() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <section id="hero" class="py-20 md:py-32 bg-gradient-to-br from-indigo-50 via-white to-purple-50">
            <div class="container mx-auto px-4 text-center">
                <h1 class="text-5xl md:text-6xl font-bold mb-6 bg-gradient-to-r from-indigo-600
                           to-purple-600 bg-clip-text text-transparent">
                    "Банк нового поколения"
                </h1>
                <p class="text-xl text-gray-600 max-w-2xl mx-auto mb-10">
                    "Управляйте финансами легко и безопасно. Открывайте счета онлайн, \
                     получайте кэшбэк и пользуйтесь современными финансовыми инструментами."
                </p>
                <div class="flex flex-col sm:flex-row gap-4 justify-center">
                    <button
                        on:click=move |_| state.auth_open.set(true)
                        class="px-8 py-4 rounded-lg text-lg font-semibold text-white
                               bg-gradient-to-r from-indigo-600 to-purple-600 hover:opacity-90"
                    >
                        "Стать клиентом"
                    </button>
                    <button
                        on:click=move |_| scroll_to_section("services")
                        class="px-8 py-4 rounded-lg text-lg font-semibold border border-gray-300 hover:bg-gray-50"
                    >
                        "Смотреть демо"
                    </button>
                </div>

                <div class="grid grid-cols-2 md:grid-cols-4 gap-8 mt-20">
                    {STATS.iter().map(|stat| view! {
                        <div>
                            <div class="text-4xl font-bold text-indigo-600">{stat.value}</div>
                            <div class="text-gray-500 mt-1">{stat.label}</div>
                        </div>
                    }).collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn Services() -> impl IntoView {
    view! {
        <section id="services" class="py-20">
            <div class="container mx-auto px-4">
                <SectionTitle title="Наши услуги" subtitle="Всё для комфортного управления финансами" />

                <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-6">
                    {SERVICES.iter().map(|service| view! {
                        <div class="rounded-2xl border border-gray-200 p-6 hover:shadow-xl transition-shadow">
                            <div class="w-12 h-12 rounded-xl bg-indigo-50 flex items-center justify-center text-2xl mb-4">
                                {service.icon}
                            </div>
                            <h3 class="text-xl font-semibold mb-2">{service.title}</h3>
                            <p class="text-gray-500 mb-4">{service.description}</p>
                            <ul class="space-y-2 mb-6">
                                {service.features.iter().map(|feature| view! {
                                    <li class="flex items-center text-sm">
                                        <span class="text-green-600 mr-2">"✓"</span>
                                        {*feature}
                                    </li>
                                }).collect_view()}
                            </ul>
                            <button class="w-full py-2 rounded-lg border border-gray-300 hover:bg-gray-50">
                                "Подробнее"
                            </button>
                        </div>
                    }).collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn FaqSection() -> impl IntoView {
    // Single-open accordion
    let (expanded, set_expanded) = create_signal(None::<usize>);

    view! {
        <section id="faq" class="py-20 bg-gray-50">
            <div class="container mx-auto px-4 max-w-3xl">
                <SectionTitle title="Вопросы и ответы" subtitle="Ответы на частые вопросы наших клиентов" />

                <div class="space-y-3">
                    {FAQS.iter().enumerate().map(|(index, faq)| {
                        let is_open = move || expanded.get() == Some(index);
                        let answer = faq.answer;
                        view! {
                            <div class="bg-white rounded-xl border border-gray-200">
                                <button
                                    class="w-full flex items-center justify-between text-left px-6 py-4 font-medium"
                                    on:click=move |_| set_expanded.update(|current| {
                                        *current = if *current == Some(index) { None } else { Some(index) };
                                    })
                                >
                                    <span>{faq.question}</span>
                                    <span class="text-gray-400">{move || if is_open() { "−" } else { "+" }}</span>
                                </button>
                                <Show when=is_open>
                                    <p class="px-6 pb-4 text-gray-600">{answer}</p>
                                </Show>
                            </div>
                        }
                    }).collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn About() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <section id="about" class="py-20">
            <div class="container mx-auto px-4">
                <SectionTitle
                    title="О банке BRILL"
                    subtitle="Мы создаём финансовые продукты, которые делают вашу жизнь проще"
                />

                <div class="grid md:grid-cols-3 gap-6 mb-12">
                    {PILLARS.iter().map(|pillar| view! {
                        <div class="rounded-2xl border border-gray-200 p-6">
                            <div class="text-3xl mb-4">{pillar.icon}</div>
                            <h3 class="text-xl font-semibold mb-2">{pillar.title}</h3>
                            <p class="text-gray-600">{pillar.text}</p>
                        </div>
                    }).collect_view()}
                </div>

                <div class="rounded-2xl p-8 md:p-12 text-white bg-gradient-to-r from-indigo-600 to-purple-600">
                    <h3 class="text-3xl font-bold mb-6">"Почему BRILL?"</h3>
                    <ul class="space-y-3 mb-8">
                        {WHY_BRILL.iter().map(|reason| view! {
                            <li class="flex items-center">
                                <span class="mr-3">"✓"</span>
                                {*reason}
                            </li>
                        }).collect_view()}
                    </ul>
                    <button
                        on:click=move |_| state.auth_open.set(true)
                        class="px-6 py-3 rounded-lg font-semibold bg-white text-indigo-600 hover:bg-gray-100"
                    >
                        "Присоединиться к BRILL"
                    </button>
                </div>
            </div>
        </section>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-gray-900 text-gray-300 py-12">
            <div class="container mx-auto px-4">
                <div class="grid md:grid-cols-4 gap-8 mb-8">
                    <div>
                        <div class="text-2xl font-bold text-white mb-3">"BRILL"</div>
                        <p class="text-sm text-gray-400">"Банк нового поколения для ваших финансовых целей"</p>
                    </div>
                    {FOOTER_COLUMNS.iter().map(|column| view! {
                        <div>
                            <h4 class="font-semibold text-white mb-3">{column.title}</h4>
                            <ul class="space-y-2 text-sm">
                                {column.links.iter().map(|link| view! {
                                    <li><a href="#" class="hover:text-white">{*link}</a></li>
                                }).collect_view()}
                            </ul>
                        </div>
                    }).collect_view()}
                </div>
                <div class="border-t border-gray-800 pt-6 flex flex-col md:flex-row justify-between
                            text-sm text-gray-500 gap-4">
                    <span>"© 2024 BRILL. Все права защищены."</span>
                    <div class="flex gap-6">
                        <a href="#" class="hover:text-white">"Политика конфиденциальности"</a>
                        <a href="#" class="hover:text-white">"Условия использования"</a>
                    </div>
                </div>
            </div>
        </footer>
    }
}

#[component]
fn SectionTitle(title: &'static str, subtitle: &'static str) -> impl IntoView {
    view! {
        <div class="text-center mb-12">
            <h2 class="text-4xl font-bold mb-4">{title}</h2>
            <p class="text-xl text-gray-500">{subtitle}</p>
        </div>
    }
}
