//! Chat Routes
//!
//! - POST /api/v1/chat - Ask the AI assistant

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{ChatRequest, ChatResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::JsonBody;
use crate::api::state::AppState;
use crate::assistant::AssistantError;

/// POST /api/v1/chat
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::Validation(
            "Сообщение не может быть пустым".to_string(),
        ));
    }

    let assistant = state
        .assistant
        .as_ref()
        .ok_or(ApiError::Assistant(AssistantError::NotConfigured))?;

    let reply = assistant.reply(message).await?;

    tracing::debug!(chars = reply.chars().count(), "Assistant replied");

    Ok(Json(ChatResponse {
        success: true,
        reply,
    }))
}
