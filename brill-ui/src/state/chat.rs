//! Chat Log
//!
//! Conversation held by the assistant widget. At most one question is in
//! flight at a time.

use chrono::{DateTime, Utc};

pub const GREETING: &str =
    "Здравствуйте! Я AI-помощник банка BRILL. Чем могу помочь?";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sender {
    User,
    Ai,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// `HH:MM`
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[derive(Clone, Debug)]
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

    /// Record a question and mark it pending.
    ///
    /// Returns the trimmed text to send, or `None` when the input is blank or
    /// an answer is still awaited.
    pub fn begin(&mut self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if self.pending || trimmed.is_empty() {
            return None;
        }
        self.push(input.to_string(), Sender::User);
        self.pending = true;
        Some(trimmed.to_string())
    }

    pub fn complete(&mut self, reply: String) {
        self.push(reply, Sender::Ai);
        self.pending = false;
    }

    /// The question stays in the log; only the pending flag is released
    pub fn fail(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
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
    fn test_question_and_reply() {
        let mut log = ChatLog::new();
        assert_eq!(log.begin("  Какие ставки?  ").as_deref(), Some("Какие ставки?"));
        assert!(log.is_pending());

        // Second question is refused while the first is in flight
        assert_eq!(log.begin("ещё"), None);

        log.complete("До 18% годовых".to_string());
        assert!(!log.is_pending());

        let senders: Vec<Sender> = log.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::Ai, Sender::User, Sender::Ai]);

        let ids: Vec<u64> = log.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_blank_and_failed() {
        let mut log = ChatLog::new();
        assert_eq!(log.begin("   "), None);
        assert_eq!(log.messages().len(), 1);

        log.begin("Привет").unwrap();
        log.fail();
        assert!(!log.is_pending());
        assert_eq!(log.messages().len(), 2);
        assert!(log.begin("Ещё раз").is_some());
    }
}
