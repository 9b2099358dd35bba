//! Chat transcript
//!
//! Mirrors the floating chat widget: an opening greeting from the
//! assistant, one reply per question, and no new question while the
//! previous one is still in flight.

use chrono::{DateTime, Utc};

/// Opening line shown before the customer types anything
pub const GREETING: &str = "Здравствуйте! Я AI-помощник банка BRILL. Чем могу помочь?";

/// Shown when the server rejects the message without an error text
pub const UNAVAILABLE: &str = "AI не доступен. Добавьте OPENAI_API_KEY в секреты.";

/// Shown when the request never reached the server
pub const UNREACHABLE: &str = "Не удалось связаться с AI";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// Ordered transcript plus the in-flight flag
#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
    pending: bool,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatLog {
    pub fn new() -> Self {
        let mut log = Self {
            messages: Vec::new(),
            next_id: 1,
            pending: false,
        };
        log.push(GREETING.to_string(), Sender::Ai);
        log
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// A request is in flight
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record the customer's message and mark a request in flight.
    ///
    /// Returns the text to send, or `None` when the input is blank or a
    /// request is already pending; the transcript is unchanged then.
    pub fn begin(&mut self, input: &str) -> Option<String> {
        if self.pending || input.trim().is_empty() {
            return None;
        }
        self.push(input.to_string(), Sender::User);
        self.pending = true;
        Some(input.trim().to_string())
    }

    /// Append the assistant's reply and clear the in-flight flag
    pub fn complete(&mut self, reply: String) {
        self.push(reply, Sender::Ai);
        self.pending = false;
    }

    /// Clear the in-flight flag without a reply
    pub fn fail(&mut self) {
        self.pending = false;
    }

    fn push(&mut self, text: String, sender: Sender) {
        self.messages.push(ChatMessage {
            id: self.next_id,
            text,
            sender,
            timestamp: Utc::now(),
        });
        self.next_id += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_greeting() {
        let log = ChatLog::new();
        assert_eq!(log.messages().len(), 1);
        assert_eq!(log.messages()[0].sender, Sender::Ai);
        assert_eq!(log.messages()[0].text, GREETING);
        assert!(!log.is_pending());
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut log = ChatLog::new();
        assert_eq!(log.begin("   "), None);
        assert_eq!(log.messages().len(), 1);
        assert!(!log.is_pending());
    }

    #[test]
    fn test_input_inert_while_pending() {
        let mut log = ChatLog::new();
        assert_eq!(log.begin(" Какой кэшбэк? "), Some("Какой кэшбэк?".to_string()));
        assert!(log.is_pending());

        assert_eq!(log.begin("ещё вопрос"), None);
        assert_eq!(log.messages().len(), 2);

        log.complete("До 10%".to_string());
        assert!(!log.is_pending());
        assert_eq!(log.messages().last().unwrap().sender, Sender::Ai);
        assert!(log.begin("ещё вопрос").is_some());
    }

    #[test]
    fn test_failure_reenables_input() {
        let mut log = ChatLog::new();
        log.begin("Привет").unwrap();
        log.fail();

        assert!(!log.is_pending());
        assert_eq!(log.messages().len(), 2);
        assert!(log.begin("Привет снова").is_some());
    }

    #[test]
    fn test_ids_increase() {
        let mut log = ChatLog::new();
        log.begin("a").unwrap();
        log.complete("b".into());
        let ids: Vec<u64> = log.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
