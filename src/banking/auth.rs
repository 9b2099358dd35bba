//! Authentication and registration

use crate::banking::{BankingError, BankingResult};
use crate::storage::{AccountStore, User};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// What the auth endpoint was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    /// Parse the `action` field of an auth request
    pub fn parse(action: Option<&str>) -> BankingResult<Self> {
        match action {
            Some("login") => Ok(AuthAction::Login),
            Some("register") => Ok(AuthAction::Register),
            _ => Err(BankingError::InvalidAction),
        }
    }
}

/// Token and account returned after a successful login or registration
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Hex-encoded SHA-256 of the password
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fresh opaque session token (64 hex characters)
pub fn generate_token() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Emails are matched trimmed and case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Login and registration against the account store
pub struct AuthService {
    store: Arc<AccountStore>,
}

impl AuthService {
    pub fn new(store: Arc<AccountStore>) -> Self {
        Self { store }
    }

    /// Run an auth request.
    ///
    /// Credentials are checked before the action so that a request with an
    /// unknown action and no email still reports the missing credentials.
    pub fn authenticate(
        &self,
        action: Option<&str>,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> BankingResult<AuthSession> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(BankingError::MissingCredentials);
        }

        match AuthAction::parse(action)? {
            AuthAction::Login => self.login(&email, password),
            AuthAction::Register => self.register(&email, password, full_name.unwrap_or("")),
        }
    }

    /// Create an account; `email` must already be normalized
    pub fn register(&self, email: &str, password: &str, full_name: &str) -> BankingResult<AuthSession> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(BankingError::MissingFullName);
        }

        let user = self
            .store
            .create_user(email, &hash_password(password), full_name)?;

        tracing::info!(user_id = user.id, "Account registered");

        Ok(AuthSession {
            token: generate_token(),
            user,
        })
    }

    /// Check credentials; `email` must already be normalized
    pub fn login(&self, email: &str, password: &str) -> BankingResult<AuthSession> {
        let user = self
            .store
            .find_by_credentials(email, &hash_password(password))?
            .ok_or(BankingError::InvalidCredentials)?;

        tracing::info!(user_id = user.id, "Login succeeded");

        Ok(AuthSession {
            token: generate_token(),
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(Arc::new(AccountStore::open_in_memory().unwrap()))
    }

    #[test]
    fn test_hash_password() {
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn test_register_then_login() {
        let auth = service();

        let registered = auth
            .authenticate(Some("register"), " Ivan@Example.com ", "secret", Some(" Иван Иванов "))
            .unwrap();
        assert_eq!(registered.user.email, "ivan@example.com");
        assert_eq!(registered.user.full_name, "Иван Иванов");
        assert_eq!(registered.user.balance.0, 0);

        let logged_in = auth
            .authenticate(Some("login"), "IVAN@example.com", "secret", None)
            .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
        assert_ne!(logged_in.token, registered.token);
    }

    #[test]
    fn test_login_wrong_password() {
        let auth = service();
        auth.authenticate(Some("register"), "a@b.c", "right", Some("A"))
            .unwrap();

        let err = auth
            .authenticate(Some("login"), "a@b.c", "wrong", None)
            .unwrap_err();
        assert!(matches!(err, BankingError::InvalidCredentials));
    }

    #[test]
    fn test_register_validation() {
        let auth = service();

        let err = auth
            .authenticate(Some("register"), "a@b.c", "pw", Some("   "))
            .unwrap_err();
        assert!(matches!(err, BankingError::MissingFullName));

        let err = auth
            .authenticate(Some("register"), "", "pw", Some("A"))
            .unwrap_err();
        assert!(matches!(err, BankingError::MissingCredentials));

        auth.authenticate(Some("register"), "a@b.c", "pw", Some("A"))
            .unwrap();
        let err = auth
            .authenticate(Some("register"), "A@B.C", "pw2", Some("B"))
            .unwrap_err();
        assert!(matches!(err, BankingError::EmailTaken));
    }

    #[test]
    fn test_unknown_action() {
        let auth = service();
        let err = auth
            .authenticate(Some("delete"), "a@b.c", "pw", None)
            .unwrap_err();
        assert!(matches!(err, BankingError::InvalidAction));

        let err = auth.authenticate(None, "", "", None).unwrap_err();
        assert!(matches!(err, BankingError::MissingCredentials));
    }
}
