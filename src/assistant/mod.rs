//! AI Assistant
//!
//! Answers customer questions in the chat widget by forwarding them to a
//! chat-completions model primed with facts about the bank.
//!
//! ## Architecture
//!
//! - **ChatBackend**: trait the API layer talks to
//! - **OpenAiClient**: REST implementation for OpenAI-compatible endpoints

mod client;

pub use client::{AssistantConfig, AssistantError, ChatBackend, OpenAiClient};

use std::sync::Arc;

/// Instructions sent ahead of every customer message
pub const SYSTEM_PROMPT: &str = "Ты - помощник банка BRILL. Отвечай на вопросы клиентов про банковские услуги кратко и по делу.

Информация о банке:
- Дебетовые карты: кэшбэк до 10%, бесплатное обслуживание
- Кредитные карты: льготный период 120 дней, лимит до 1 млн ₽
- Вклады: до 18% годовых, пополняемые, застрахованы
- Ипотека: от 5.9% годовых, одобрение за 1 день
- Переводы внутри банка бесплатно, на другие банки до 100к/мес без комиссии
- Поддержка 24/7: 8-800-100-BRILL

Будь вежливым, профессиональным и помогай клиентам.";

/// Build the configured backend, or `None` when no API key is available
pub fn backend_from_config(config: AssistantConfig) -> Option<Arc<dyn ChatBackend>> {
    match OpenAiClient::new(config) {
        Ok(client) => Some(Arc::new(client)),
        Err(AssistantError::NotConfigured) => None,
        Err(e) => {
            tracing::warn!("Assistant client could not be created: {}", e);
            None
        }
    }
}
