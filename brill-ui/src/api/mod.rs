//! API Client
//!
//! HTTP communication with the BRILL API.

pub mod client;

pub use client::*;
