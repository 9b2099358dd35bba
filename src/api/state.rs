//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::assistant::ChatBackend;
use crate::banking::{AuthService, TransferService};
use crate::config::ApiConfig;
use crate::storage::AccountStore;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Account and transaction store
    pub store: Arc<AccountStore>,
    /// Login and registration
    pub auth: Arc<AuthService>,
    /// Card transfers
    pub transfers: Arc<TransferService>,
    /// Chat assistant; `None` when no API key is configured
    pub assistant: Option<Arc<dyn ChatBackend>>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state without an assistant
    pub fn new(store: Arc<AccountStore>, config: ApiConfig) -> Self {
        Self {
            auth: Arc::new(AuthService::new(Arc::clone(&store))),
            transfers: Arc::new(TransferService::new(Arc::clone(&store))),
            store,
            assistant: None,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Attach a chat backend
    pub fn with_assistant(mut self, assistant: Option<Arc<dyn ChatBackend>>) -> Self {
        self.assistant = assistant;
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check if the assistant is available
    pub fn has_assistant(&self) -> bool {
        self.assistant.is_some()
    }
}
