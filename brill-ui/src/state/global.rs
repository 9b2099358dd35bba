//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use super::session::{self, Session};

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Logged-in session, mirrored to `localStorage`
    pub session: RwSignal<Option<Session>>,
    /// Auth dialog visibility
    pub auth_open: RwSignal<bool>,
    /// Error toast
    pub error: RwSignal<Notice>,
    /// Success toast
    pub success: RwSignal<Notice>,
}

/// One toast slot. Every message gets a new generation, and a timer only
/// clears the message it was started for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notice {
    message: Option<String>,
    generation: u64,
}

impl Notice {
    /// Replace the message; returns the generation to expire later
    pub fn show(&mut self, message: &str) -> u64 {
        self.generation += 1;
        self.message = Some(message.to_string());
        self.generation
    }

    /// Clear the message if it is still the one from `generation`
    pub fn expire(&mut self, generation: u64) {
        if self.generation == generation {
            self.message = None;
        }
    }

    pub fn message(&self) -> Option<String> {
        self.message.clone()
    }
}

/// Account as returned by the API and cached under `brill_user`
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    /// Rubles
    pub balance: f64,
    #[serde(default)]
    pub created_at: String,
}

impl User {
    pub fn first_name(&self) -> &str {
        crate::forms::first_name(&self.full_name)
    }
}

/// One entry of the operations list
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    /// `transfer` or `deposit`
    #[serde(rename = "type")]
    pub kind: String,
    /// Rubles, always positive
    pub amount: f64,
    pub description: String,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub status: String,
    pub created_at: String,
}

impl Transaction {
    /// Incoming money is shown in green with a plus sign
    pub fn is_income(&self) -> bool {
        self.kind == "deposit"
    }

    /// `dd.mm.yyyy`, or the raw value when it is not RFC 3339
    pub fn date_label(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.format("%d.%m.%Y").to_string())
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(session::load_session()),
        auth_open: create_rw_signal(false),
        error: create_rw_signal(Notice::default()),
        success: create_rw_signal(Notice::default()),
    };

    provide_context(state);
}

impl GlobalState {
    /// Store a fresh session after login or registration
    pub fn sign_in(&self, new_session: Session) {
        session::save_session(&new_session);
        self.session.set(Some(new_session));
    }

    /// Drop the session from memory and `localStorage`
    pub fn sign_out(&self) {
        session::clear_session();
        self.session.set(None);
    }

    /// Apply a balance reported by the server
    pub fn set_balance(&self, balance: f64) {
        self.session.update(|current| {
            if let Some(current) = current {
                current.user.balance = balance;
                session::save_session(current);
            }
        });
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.as_ref().map(|s| s.user.clone()))
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        show_notice(self.success, message, 3000);
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        show_notice(self.error, message, 5000);
    }
}

fn show_notice(slot: RwSignal<Notice>, message: &str, millis: u32) {
    let mut generation = 0;
    slot.update(|notice| generation = notice.show(message));

    gloo_timers::callback::Timeout::new(millis, move || {
        slot.update(|notice| notice.expire(generation));
    }).forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(kind: &str, created_at: &str) -> Transaction {
        Transaction {
            id: 1,
            kind: kind.to_string(),
            amount: 1500.0,
            description: "Перевод на карту 9012".to_string(),
            card_number: Some("2200123456789012".to_string()),
            status: "completed".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_transaction_from_api() {
        let json = r#"{"id":7,"user_id":1,"type":"transfer","amount":1500.5,
            "description":"Перевод на карту 9012","status":"completed",
            "created_at":"2024-11-18T10:00:00Z"}"#;
        let parsed: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind, "transfer");
        assert_eq!(parsed.card_number, None);
        assert!(!parsed.is_income());
        assert_eq!(parsed.date_label(), "18.11.2024");
    }

    #[test]
    fn test_transaction_income_and_bad_date() {
        let deposit = tx("deposit", "yesterday");
        assert!(deposit.is_income());
        assert_eq!(deposit.date_label(), "yesterday");
    }

    #[test]
    fn test_notice_old_timer_keeps_newer_message() {
        let mut notice = Notice::default();
        let first = notice.show("Вы вошли в систему");
        let second = notice.show("Успешно! Перевод выполнен");

        notice.expire(first);
        assert_eq!(notice.message().as_deref(), Some("Успешно! Перевод выполнен"));

        notice.expire(second);
        assert_eq!(notice.message(), None);
    }

    #[test]
    fn test_notice_same_text_shown_twice() {
        let mut notice = Notice::default();
        let first = notice.show("Недостаточно средств");
        let second = notice.show("Недостаточно средств");
        assert_ne!(first, second);

        notice.expire(first);
        assert!(notice.message().is_some());
    }

    #[test]
    fn test_user_first_name() {
        let user = User {
            id: 1,
            email: "ivan@example.com".to_string(),
            full_name: "Иван Иванов".to_string(),
            balance: 0.0,
            created_at: String::new(),
        };
        assert_eq!(user.first_name(), "Иван");
    }
}
