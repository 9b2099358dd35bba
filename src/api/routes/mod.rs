//! API Routes
//!
//! Route handlers organized by functionality.

pub mod auth;
pub mod chat;
pub mod health;
pub mod transactions;
pub mod transfer;
