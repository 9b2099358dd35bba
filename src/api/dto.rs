//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::banking::TransferDetails;
use crate::storage::{Kopecks, Transaction, User};

// ============================================
// AUTH DTOs
// ============================================

/// Login or registration request
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    /// `login` or `register`
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Required for `register`
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Successful auth response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: User,
}

// ============================================
// TRANSFER DTOs
// ============================================

/// Card transfer request
///
/// `from_user_id` and `amount` may arrive as numbers or numeric strings.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    #[serde(default)]
    pub from_user_id: Value,
    #[serde(default)]
    pub to_card: String,
    #[serde(default)]
    pub amount: Value,
}

impl TransferRequest {
    /// Account id, or `None` when absent or not an integer
    pub fn user_id(&self) -> Option<i64> {
        match &self.from_user_id {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Successful transfer response
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub success: bool,
    pub message: String,
    pub new_balance: Kopecks,
    pub transaction_id: i64,
    pub transfer_details: TransferDetails,
}

// ============================================
// CHAT DTOs
// ============================================

/// Customer chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Assistant reply
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub reply: String,
}

// ============================================
// TRANSACTIONS DTOs
// ============================================

/// Query parameters for recent operations
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    pub user_id: i64,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// Recent operations with the current balance
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub success: bool,
    pub balance: Kopecks,
    pub transactions: Vec<Transaction>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy", "degraded", "unhealthy"
    pub status: String,
    /// Database status: "ok" or "error"
    pub database: String,
    /// Assistant status: "configured" or "disabled"
    pub assistant: String,
    /// Registered accounts
    pub users: u64,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(body: &str) -> TransferRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_transfer_user_id_number_or_string() {
        assert_eq!(transfer(r#"{"from_user_id": 7}"#).user_id(), Some(7));
        assert_eq!(transfer(r#"{"from_user_id": " 7 "}"#).user_id(), Some(7));
    }

    #[test]
    fn test_transfer_user_id_unusable() {
        assert_eq!(transfer(r#"{}"#).user_id(), None);
        assert_eq!(transfer(r#"{"from_user_id": null}"#).user_id(), None);
        assert_eq!(transfer(r#"{"from_user_id": "abc"}"#).user_id(), None);
        assert_eq!(transfer(r#"{"from_user_id": 1.5}"#).user_id(), None);
    }
}
