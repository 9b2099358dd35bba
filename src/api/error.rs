//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::assistant::AssistantError;
use crate::banking::BankingError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed; the message is shown to the customer
    #[error("{0}")]
    Validation(String),

    /// Auth or transfer rule rejected the request
    #[error(transparent)]
    Banking(#[from] BankingError),

    /// Chat assistant failure
    #[error("{}", assistant_message(.0))]
    Assistant(#[from] AssistantError),

    /// The request body or query string could not be read
    #[error("Некорректный запрос")]
    MalformedRequest(String),

    /// The handler did not finish within the request deadline
    #[error("Превышено время ожидания ответа")]
    Timeout,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn assistant_message(err: &AssistantError) -> String {
    match err {
        AssistantError::NotConfigured => "AI не настроен".to_string(),
        other => format!("Ошибка AI: {}", other),
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub request_id: String,
}

impl ApiError {
    /// HTTP status and a stable code for logs
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Banking(e) => match e {
                BankingError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
                BankingError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
                BankingError::InsufficientFunds => (StatusCode::BAD_REQUEST, "INSUFFICIENT_FUNDS"),
                BankingError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
                _ => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            },
            ApiError::Assistant(AssistantError::NotConfigured) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "AI_NOT_CONFIGURED")
            }
            ApiError::Assistant(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AI_ERROR"),
            ApiError::MalformedRequest(_) => (StatusCode::BAD_REQUEST, "MALFORMED_REQUEST"),
            ApiError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        let request_id = uuid::Uuid::new_v4().to_string();

        if let ApiError::MalformedRequest(detail) = &self {
            tracing::debug!(request_id = %request_id, detail = %detail, "Unreadable request");
        }

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::Banking(BankingError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (ApiError::Banking(BankingError::UserNotFound), StatusCode::NOT_FOUND),
            (ApiError::Banking(BankingError::InsufficientFunds), StatusCode::BAD_REQUEST),
            (ApiError::Banking(BankingError::InvalidAction), StatusCode::BAD_REQUEST),
            (
                ApiError::Assistant(AssistantError::NotConfigured),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::MalformedRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Timeout, StatusCode::GATEWAY_TIMEOUT),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status().0, expected, "{}", err);
        }
    }

    #[test]
    fn test_customer_messages() {
        assert_eq!(
            ApiError::Banking(BankingError::InsufficientFunds).to_string(),
            "Недостаточно средств"
        );
        assert_eq!(
            ApiError::Assistant(AssistantError::NotConfigured).to_string(),
            "AI не настроен"
        );
        assert_eq!(
            ApiError::Assistant(AssistantError::Timeout).to_string(),
            "Ошибка AI: request timeout"
        );
    }
}
