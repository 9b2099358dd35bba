//! # BRILL
//!
//! Backend and terminal client for the BRILL retail bank site: accounts,
//! card transfers and an AI chat assistant, built as a full-stack Rust
//! application with a Leptos front end in `brill-ui`.
//!
//! ## Features
//!
//! - **Accounts**: registration and login with SHA-256 password hashes
//! - **Transfers**: atomic debit plus transaction record in SQLite
//! - **Assistant**: chat-completions proxy primed with bank facts
//! - **Terminal client**: the site's flows from the command line
//!
//! ## Modules
//!
//! - [`storage`]: SQLite account store
//! - [`banking`]: card, amount, auth and transfer rules
//! - [`assistant`]: AI chat backend
//! - [`api`]: REST API server with Axum
//! - [`client`]: HTTP client and session file for `brill-cli`
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brill::banking::{AuthService, TransferService};
//! use brill::storage::{AccountStore, Kopecks};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(AccountStore::open_in_memory()?);
//!     let auth = AuthService::new(Arc::clone(&store));
//!     let transfers = TransferService::new(Arc::clone(&store));
//!
//!     let session = auth.register("ivan@example.com", "secret", "Иван Иванов")?;
//!     store.deposit(session.user.id, Kopecks(1_000_000), "Пополнение")?;
//!
//!     let outcome = transfers.transfer(Some(session.user.id), "2200 1234 5678 9012", &json!(1500))?;
//!     println!("{}", outcome.message);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod assistant;
pub mod banking;
pub mod client;
pub mod config;
pub mod storage;

pub use banking::{BankingError, BankingResult};
pub use config::Config;
pub use storage::{AccountStore, Kopecks, StorageError, User};
