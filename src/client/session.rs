//! Persisted login
//!
//! A small JSON key/value file holding the same two entries the site keeps
//! in browser storage: `brill_user` (the account as a JSON string) and
//! `brill_token`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::client::http::{ClientError, ClientResult};
use crate::storage::{Kopecks, User};

/// Key of the cached account record
pub const USER_KEY: &str = "brill_user";
/// Key of the session token
pub const TOKEN_KEY: &str = "brill_token";

/// A logged-in customer
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// File-backed key/value store
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current session, or `None` when either key is missing or the cached
    /// user record does not parse.
    pub fn load(&self) -> ClientResult<Option<Session>> {
        let entries = self.read_entries()?;

        let (Some(user), Some(token)) = (entries.get(USER_KEY), entries.get(TOKEN_KEY)) else {
            return Ok(None);
        };

        match serde_json::from_str::<User>(user) {
            Ok(user) => Ok(Some(Session {
                token: token.clone(),
                user,
            })),
            Err(e) => {
                tracing::warn!("Ignoring unreadable {}: {}", USER_KEY, e);
                Ok(None)
            }
        }
    }

    /// Store both keys
    pub fn save(&self, session: &Session) -> ClientResult<()> {
        let mut entries = self.read_entries()?;
        let user = serde_json::to_string(&session.user)
            .map_err(|e| ClientError::Session(e.to_string()))?;
        entries.insert(USER_KEY.to_string(), user);
        entries.insert(TOKEN_KEY.to_string(), session.token.clone());
        self.write_entries(&entries)
    }

    /// Rewrite the cached balance after a transfer
    pub fn update_balance(&self, balance: Kopecks) -> ClientResult<Option<Session>> {
        let Some(mut session) = self.load()? else {
            return Ok(None);
        };
        session.user.balance = balance;
        self.save(&session)?;
        Ok(Some(session))
    }

    /// Remove both keys, leaving any other entries in place
    pub fn clear(&self) -> ClientResult<()> {
        let mut entries = self.read_entries()?;
        entries.remove(USER_KEY);
        entries.remove(TOKEN_KEY);
        self.write_entries(&entries)
    }

    fn read_entries(&self) -> ClientResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| ClientError::Session(format!("{}: {}", self.path.display(), e)))?;

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!("Session file {:?} is corrupt, starting fresh: {}", self.path, e);
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ClientError::Session(e.to_string()))?;
            }
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| ClientError::Session(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| ClientError::Session(e.to_string()))
    }
}
