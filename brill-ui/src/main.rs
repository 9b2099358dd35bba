//! BRILL Site
//!
//! Public site and customer dashboard of the BRILL bank, built with Leptos
//! (WASM).
//!
//! # Features
//!
//! - Landing page with services, FAQ and an auth dialog
//! - Dashboard with balance, card transfers and recent operations
//! - Floating AI assistant chat
//!
//! # Architecture
//!
//! Client-side rendered Leptos application compiled to WebAssembly. It talks
//! to the BRILL API over HTTP and keeps the session in `localStorage` under
//! `brill_user` and `brill_token`.

use leptos::*;

mod api;
mod app;
mod components;
mod content;
mod forms;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
