//! UI Components
//!
//! Reusable Leptos components for the site and dashboard.

pub mod auth_dialog;
pub mod chat_widget;
pub mod loading;
pub mod nav;
pub mod toast;
pub mod transfer_dialog;

pub use auth_dialog::AuthDialog;
pub use chat_widget::ChatWidget;
pub use loading::ListSkeleton;
pub use nav::Nav;
pub use toast::Toast;
pub use transfer_dialog::TransferDialog;
