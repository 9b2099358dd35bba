//! Auth Routes
//!
//! - POST /api/v1/auth - Login or register

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{AuthRequest, AuthResponse};
use crate::api::error::ApiResult;
use crate::api::extract::JsonBody;
use crate::api::state::AppState;

/// POST /api/v1/auth
///
/// `action` selects login or registration. Both return a fresh token and
/// the account record.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<AuthRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let session = state.auth.authenticate(
        req.action.as_deref(),
        &req.email,
        &req.password,
        req.full_name.as_deref(),
    )?;

    Ok(Json(AuthResponse {
        success: true,
        token: session.token,
        user: session.user,
    }))
}
