//! State Management
//!
//! Global reactive state and the `localStorage` session.

pub mod chat;
pub mod global;
pub mod session;

pub use chat::{ChatLog, Sender};
pub use global::{provide_global_state, GlobalState, Transaction, User};
pub use session::Session;
