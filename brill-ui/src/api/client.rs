//! HTTP API Client
//!
//! Functions for communicating with the BRILL REST API. Every call returns
//! the message to show the customer as its error.

use gloo_net::http::{Request, Response};

use crate::state::{Session, Transaction, User};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082/api/v1";

/// `localStorage` key overriding [`DEFAULT_API_BASE`]
pub const API_URL_KEY: &str = "brill_api_url";

pub const NETWORK_ERROR: &str = "Проблема с подключением";
pub const LOGIN_FAILED: &str = "Не удалось войти";
pub const REGISTER_FAILED: &str = "Не удалось зарегистрироваться";
pub const TRANSFER_FAILED: &str = "Не удалось выполнить перевод";
pub const HISTORY_FAILED: &str = "Не удалось загрузить операции";
pub const AI_UNAVAILABLE: &str = "AI не доступен. Добавьте OPENAI_API_KEY в секреты.";
pub const AI_UNREACHABLE: &str = "Не удалось связаться с AI";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, serde::Deserialize)]
pub struct TransferResponse {
    pub message: String,
    /// Rubles
    pub new_balance: f64,
}

#[derive(Debug, serde::Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct TransactionsResponse {
    pub balance: f64,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub error: Option<String>,
}

// ============ API Functions ============

/// Log into an existing account
pub async fn login(email: &str, password: &str) -> Result<Session, String> {
    #[derive(serde::Serialize)]
    struct LoginRequest<'a> {
        action: &'static str,
        email: &'a str,
        password: &'a str,
    }

    let response = post(
        "/auth",
        &LoginRequest {
            action: "login",
            email,
            password,
        },
    )
    .await?;

    let auth: AuthResponse = decode(response, LOGIN_FAILED).await?;
    Ok(Session {
        token: auth.token,
        user: auth.user,
    })
}

/// Open a new account
pub async fn register(email: &str, password: &str, full_name: &str) -> Result<Session, String> {
    #[derive(serde::Serialize)]
    struct RegisterRequest<'a> {
        action: &'static str,
        email: &'a str,
        password: &'a str,
        full_name: &'a str,
    }

    let response = post(
        "/auth",
        &RegisterRequest {
            action: "register",
            email,
            password,
            full_name,
        },
    )
    .await?;

    let auth: AuthResponse = decode(response, REGISTER_FAILED).await?;
    Ok(Session {
        token: auth.token,
        user: auth.user,
    })
}

/// Transfer rubles from the account to a card
pub async fn transfer(user_id: i64, card: &str, amount: f64) -> Result<TransferResponse, String> {
    #[derive(serde::Serialize)]
    struct TransferRequest<'a> {
        from_user_id: i64,
        to_card: &'a str,
        amount: f64,
    }

    let response = post(
        "/transfer",
        &TransferRequest {
            from_user_id: user_id,
            to_card: card,
            amount,
        },
    )
    .await?;

    decode(response, TRANSFER_FAILED).await
}

/// Ask the AI assistant
pub async fn send_chat(message: &str) -> Result<String, String> {
    #[derive(serde::Serialize)]
    struct ChatRequest<'a> {
        message: &'a str,
    }

    let response = post("/chat", &ChatRequest { message })
        .await
        .map_err(|_| AI_UNREACHABLE.to_string())?;

    let chat: ChatResponse = decode(response, AI_UNAVAILABLE).await?;
    Ok(chat.reply)
}

/// Current balance and the latest operations
pub async fn fetch_transactions(user_id: i64, limit: usize) -> Result<TransactionsResponse, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!(
        "{}/transactions?user_id={}&limit={}",
        api_base, user_id, limit
    ))
    .send()
    .await
    .map_err(|e| network_error(&e))?;

    decode(response, HISTORY_FAILED).await
}

async fn post<T: serde::Serialize>(path: &str, body: &T) -> Result<Response, String> {
    let api_base = get_api_base();

    Request::post(&format!("{}{}", api_base, path))
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| network_error(&e))
}

/// Parse a success body, or turn an error body into its message
async fn decode<T: serde::de::DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, String> {
    if !response.ok() {
        let error: ApiError = response.json().await.unwrap_or(ApiError { error: None });
        return Err(rejection_message(error, fallback));
    }

    response.json().await.map_err(|e| {
        web_sys::console::error_1(&format!("Parse error: {}", e).into());
        fallback.to_string()
    })
}

fn rejection_message(error: ApiError, fallback: &str) -> String {
    error
        .error
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn network_error(err: &gloo_net::Error) -> String {
    web_sys::console::error_1(&format!("Network error: {}", err).into());
    NETWORK_ERROR.to_string()
}
