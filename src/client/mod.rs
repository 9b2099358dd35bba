//! Terminal client
//!
//! Everything `brill-cli` needs to talk to the server the way the site does:
//!
//! - **http**: typed calls to the REST API
//! - **session**: the persisted `brill_user` / `brill_token` pair
//! - **chat**: chat transcript with the in-flight guard

pub mod chat;
pub mod http;
pub mod session;

pub use chat::{ChatLog, ChatMessage, Sender, GREETING};
pub use http::{BankClient, ClientError, ClientResult, TransferResult};
pub use session::{Session, SessionStore, TOKEN_KEY, USER_KEY};
