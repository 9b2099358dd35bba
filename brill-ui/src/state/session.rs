//! Browser Session
//!
//! The logged-in user and token live in `localStorage` under
//! [`USER_KEY`] and [`TOKEN_KEY`], the same keys the terminal client uses
//! in its session file.

use super::global::User;

pub const USER_KEY: &str = "brill_user";
pub const TOKEN_KEY: &str = "brill_token";

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Restore the session; `None` unless both keys are present and the user parses
pub fn load_session() -> Option<Session> {
    let storage = storage()?;
    let user = storage.get_item(USER_KEY).ok().flatten();
    let token = storage.get_item(TOKEN_KEY).ok().flatten();
    parse_session(user.as_deref(), token.as_deref())
}

pub(crate) fn parse_session(user: Option<&str>, token: Option<&str>) -> Option<Session> {
    let user: User = serde_json::from_str(user?).ok()?;
    Some(Session {
        token: token?.to_string(),
        user,
    })
}

pub fn save_session(session: &Session) {
    let Some(storage) = storage() else {
        return;
    };
    match serde_json::to_string(&session.user) {
        Ok(user) => {
            let _ = storage.set_item(USER_KEY, &user);
            let _ = storage.set_item(TOKEN_KEY, &session.token);
        }
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to store session: {}", e).into());
        }
    }
}

/// Remove only the two session keys; other entries such as the API URL stay
pub fn clear_session() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(USER_KEY);
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = r#"{"id":1,"email":"ivan@example.com","full_name":"Иван Иванов","balance":10000.0,"created_at":"2024-11-18T10:00:00Z"}"#;

    #[test]
    fn test_parse_session() {
        let session = parse_session(Some(USER), Some("abc")).unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.user.balance, 10000.0);
    }

    #[test]
    fn test_parse_session_incomplete() {
        assert!(parse_session(None, Some("abc")).is_none());
        assert!(parse_session(Some(USER), None).is_none());
        assert!(parse_session(Some("{not json"), Some("abc")).is_none());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_save_load_clear() {
        let session = parse_session(
            Some(r#"{"id":3,"email":"a@b.ru","full_name":"Анна","balance":5.5}"#),
            Some("token"),
        )
        .unwrap();

        save_session(&session);
        assert_eq!(load_session(), Some(session));

        clear_session();
        assert_eq!(load_session(), None);
    }
}
