//! REST client for the BRILL API

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::client::chat::UNAVAILABLE;
use crate::client::session::Session;
use crate::storage::{Kopecks, Transaction, User};

/// Errors surfaced to the customer
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Проблема с подключением")]
    Network(#[from] reqwest::Error),

    /// Rejected locally before any request was made
    #[error("{0}")]
    Validation(String),

    #[error("Вы не вошли в систему")]
    NotLoggedIn,

    #[error("Не удалось сохранить сессию: {0}")]
    Session(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Result of a completed transfer
#[derive(Debug, Clone, Deserialize)]
pub struct TransferResult {
    pub message: String,
    pub new_balance: Kopecks,
}

#[derive(Deserialize)]
struct AuthBody {
    token: String,
    user: User,
}

#[derive(Deserialize)]
struct ChatBody {
    reply: String,
}

#[derive(Deserialize)]
struct TransactionsBody {
    balance: Kopecks,
    transactions: Vec<Transaction>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the BRILL API
pub struct BankClient {
    client: Client,
    base_url: String,
}

impl BankClient {
    /// Create a client for a server such as `http://localhost:8082`
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the server URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Log into an existing account
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let body = json!({"action": "login", "email": email, "password": password});
        let auth: AuthBody = self.post("/auth", &body, "Не удалось войти").await?;
        Ok(Session {
            token: auth.token,
            user: auth.user,
        })
    }

    /// Open a new account
    pub async fn register(&self, email: &str, password: &str, full_name: &str) -> ClientResult<Session> {
        let body = json!({
            "action": "register",
            "email": email,
            "password": password,
            "full_name": full_name,
        });
        let auth: AuthBody = self
            .post("/auth", &body, "Не удалось зарегистрироваться")
            .await?;
        Ok(Session {
            token: auth.token,
            user: auth.user,
        })
    }

    /// Transfer from the account to a card
    pub async fn transfer(&self, user_id: i64, card: &str, amount: Kopecks) -> ClientResult<TransferResult> {
        let body = json!({
            "from_user_id": user_id,
            "to_card": card,
            "amount": amount,
        });
        self.post("/transfer", &body, "Не удалось выполнить перевод")
            .await
    }

    /// Ask the assistant
    pub async fn chat(&self, message: &str) -> ClientResult<String> {
        let body = json!({ "message": message });
        let chat: ChatBody = self
            .post("/chat", &body, UNAVAILABLE)
            .await?;
        Ok(chat.reply)
    }

    /// Current balance and recent operations, newest first
    pub async fn transactions(&self, user_id: i64, limit: usize) -> ClientResult<(Kopecks, Vec<Transaction>)> {
        let response = self
            .client
            .get(self.url("/transactions"))
            .query(&[("user_id", user_id.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;

        let body: TransactionsBody =
            Self::decode(response, "Не удалось загрузить операции").await?;
        Ok((body.balance, body.transactions))
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
        fallback: &str,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response, fallback).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, fallback: &str) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Request rejected");
            return Err(ClientError::Rejected(rejection_message(&text, fallback)));
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::debug!("Unexpected response body: {}", e);
            ClientError::Rejected(fallback.to_string())
        })
    }
}

/// The server's `error` field, or `fallback` when there is none
fn rejection_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message() {
        assert_eq!(
            rejection_message(r#"{"success":false,"error":"Недостаточно средств"}"#, "x"),
            "Недостаточно средств"
        );
        assert_eq!(rejection_message("Bad Gateway", "Не удалось войти"), "Не удалось войти");
        assert_eq!(rejection_message(r#"{"error":""}"#, "fallback"), "fallback");
    }

    #[test]
    fn test_url_building() {
        let client = BankClient::new("http://localhost:8082/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8082");
        assert_eq!(client.url("/auth"), "http://localhost:8082/api/v1/auth");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ClientError::NotLoggedIn.to_string(), "Вы не вошли в систему");
        assert_eq!(
            ClientError::Rejected("Неверный email или пароль".into()).to_string(),
            "Неверный email или пароль"
        );
    }
}
