//! BRILL REST API
//!
//! HTTP API behind the site and the terminal client, built with Axum.
//!
//! # Endpoints
//!
//! ## Accounts
//! - `POST /api/v1/auth` - Login or register
//! - `GET /api/v1/transactions` - Recent operations and balance
//!
//! ## Transfers
//! - `POST /api/v1/transfer` - Transfer to a card
//!
//! ## Assistant
//! - `POST /api/v1/chat` - Ask the AI assistant
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use brill::api::{serve, AppState};
//! use brill::config::ApiConfig;
//! use brill::storage::{AccountStore, StorageConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(AccountStore::open(&StorageConfig::new("brill.db"))?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::assistant::ChatBackend;
use crate::config::ApiConfig;

/// Browsers may cache the preflight answer for a day
const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Headroom left for the assistant to report its own timeout
const ASSISTANT_GRACE: Duration = Duration::from_secs(5);

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth", post(routes::auth::authenticate))
        .route("/transfer", post(routes::transfer::create_transfer))
        .route("/chat", post(routes::chat::send_message))
        .route("/transactions", get(routes::transactions::list_transactions));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let config = Arc::clone(&state.config);
    let deadline = request_deadline(&config, state.assistant.as_deref());
    let shared_state = Arc::new(state);

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes);

    if let Some(dir) = &config.static_dir {
        let dir = Path::new(dir);
        tracing::info!("Serving site from {}", dir.display());
        router = router.fallback_service(
            ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html"))),
        );
    }

    router
        .layer(middleware::from_fn_with_state(deadline, enforce_deadline))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(shared_state)
}

/// Per-request deadline: `request_timeout_secs`, raised when needed so a
/// slow assistant fails with its own error first.
fn request_deadline(config: &ApiConfig, assistant: Option<&dyn ChatBackend>) -> Duration {
    let configured = Duration::from_secs(config.request_timeout_secs);
    match assistant.and_then(|backend| backend.timeout()) {
        Some(upstream) => configured.max(upstream + ASSISTANT_GRACE),
        None => configured,
    }
}

/// Answer with [`ApiError::Timeout`] once the deadline passes
async fn enforce_deadline(State(deadline): State<Duration>, request: Request, next: Next) -> Response {
    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => ApiError::Timeout.into_response(),
    }
}

/// CORS policy: configured origins (any when empty), the three methods the
/// site uses, and the two headers it sends.
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origin = if config.cors_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .cors_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-auth-token")])
        .max_age(CORS_MAX_AGE)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("BRILL API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("BRILL API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
