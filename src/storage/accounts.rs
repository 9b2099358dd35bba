//! Account Store - SQLite-backed users and transactions
//!
//! Holds the single SQLite connection behind a mutex. Every operation is a
//! short synchronous statement (or one transaction), so handlers call it
//! directly without holding the lock across an await point.
//!
//! # Schema
//!
//! ```text
//! users(id, email UNIQUE, password_hash, full_name, balance, created_at)
//! transactions(id, user_id → users.id, type, amount, description,
//!              card_number, status, created_at)
//! ```
//!
//! Amounts are stored in kopecks.

use crate::storage::types::{Kopecks, Transaction, TransactionKind, TransferReceipt, User};
use crate::storage::{StorageError, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path of the SQLite database file
    pub database_path: PathBuf,
}

impl StorageConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }
}

/// Users and their transaction history
pub struct AccountStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

const USER_COLUMNS: &str = "id, email, full_name, balance, created_at";

impl AccountStore {
    /// Open (or create) the database at the configured path
    pub fn open(config: &StorageConfig) -> StorageResult<Self> {
        let path = &config.database_path;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            ",
        )?;

        let store = Self {
            conn: Mutex::new(conn),
            path: Some(path.clone()),
        };
        store.migrate()?;

        tracing::info!(path = ?path, "Account store opened");
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let store = Self {
            conn: Mutex::new(conn),
            path: None,
        };
        store.migrate()?;
        Ok(store)
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))
    }

    fn migrate(&self) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                full_name TEXT NOT NULL,
                balance INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                type TEXT NOT NULL,
                amount INTEGER NOT NULL,
                description TEXT NOT NULL,
                card_number TEXT,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_user
                ON transactions(user_id, id);
            ",
        )?;
        Ok(())
    }

    /// Cheap connectivity check for readiness probes
    pub fn ping(&self) -> bool {
        match self.lock() {
            Ok(conn) => conn
                .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Insert a new user with a zero balance
    pub fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        full_name: &str,
    ) -> StorageResult<User> {
        let conn = self.lock()?;

        let exists: Option<i64> = conn
            .query_row(
                "SELECT id FROM users WHERE email = ?",
                params![email],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(StorageError::DuplicateEmail(email.to_string()));
        }

        let created_at = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO users (email, password_hash, full_name, balance, created_at)
             VALUES (?, ?, ?, 0, ?)",
            params![email, password_hash, full_name, created_at],
        )?;
        let id = conn.last_insert_rowid();

        tracing::debug!(user_id = id, "User created");

        Ok(User {
            id,
            email: email.to_string(),
            full_name: full_name.to_string(),
            balance: Kopecks::ZERO,
            created_at,
        })
    }

    /// Look up a user by email and password hash
    pub fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> StorageResult<Option<User>> {
        let conn = self.lock()?;
        let user = conn
            .query_row(
                &format!(
                    "SELECT {} FROM users WHERE email = ? AND password_hash = ?",
                    USER_COLUMNS
                ),
                params![email, password_hash],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Look up a user by id
    pub fn get_user(&self, user_id: i64) -> StorageResult<Option<User>> {
        let conn = self.lock()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
                params![user_id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Credit an account and record a deposit
    pub fn deposit(
        &self,
        user_id: i64,
        amount: Kopecks,
        description: &str,
    ) -> StorageResult<TransferReceipt> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let balance = read_balance(&tx, user_id)?;
        let new_balance = Kopecks(balance.0.saturating_add(amount.0));

        tx.execute(
            "UPDATE users SET balance = ? WHERE id = ?",
            params![new_balance.0, user_id],
        )?;
        let transaction_id = insert_transaction(
            &tx,
            user_id,
            TransactionKind::Deposit,
            amount,
            description,
            None,
        )?;
        tx.commit()?;

        Ok(TransferReceipt {
            transaction_id,
            new_balance,
        })
    }

    /// Debit an account for a card transfer
    ///
    /// Balance check, debit and the transaction row happen in one SQLite
    /// transaction; on any error nothing is written.
    pub fn debit_for_transfer(
        &self,
        user_id: i64,
        amount: Kopecks,
        card_number: &str,
        description: &str,
    ) -> StorageResult<TransferReceipt> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let balance = read_balance(&tx, user_id)?;
        let new_balance = match balance.checked_sub(amount) {
            Some(b) if b.0 >= 0 => b,
            _ => {
                return Err(StorageError::InsufficientFunds {
                    balance: balance.0,
                    requested: amount.0,
                })
            }
        };

        tx.execute(
            "UPDATE users SET balance = ? WHERE id = ?",
            params![new_balance.0, user_id],
        )?;
        let transaction_id = insert_transaction(
            &tx,
            user_id,
            TransactionKind::Transfer,
            amount,
            description,
            Some(card_number),
        )?;
        tx.commit()?;

        tracing::debug!(
            user_id,
            transaction_id,
            amount = amount.0,
            new_balance = new_balance.0,
            "Transfer debited"
        );

        Ok(TransferReceipt {
            transaction_id,
            new_balance,
        })
    }

    /// Most recent transactions of a user, newest first
    pub fn recent_transactions(&self, user_id: i64, limit: usize) -> StorageResult<Vec<Transaction>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, user_id, type, amount, description, card_number, status, created_at
             FROM transactions
             WHERE user_id = ?
             ORDER BY id DESC
             LIMIT ?",
        )?;

        let rows = stmt.query_map(params![user_id, limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
            ))
        })?;

        let mut transactions = Vec::new();
        for row in rows {
            let (id, user_id, kind, amount, description, card_number, status, created_at) = row?;
            let kind = kind.parse().map_err(StorageError::Corruption)?;
            transactions.push(Transaction {
                id,
                user_id,
                kind,
                amount: Kopecks(amount),
                description,
                card_number,
                status,
                created_at,
            });
        }

        Ok(transactions)
    }

    /// Number of registered users
    pub fn user_count(&self) -> StorageResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        full_name: row.get(2)?,
        balance: Kopecks(row.get(3)?),
        created_at: row.get(4)?,
    })
}

fn read_balance(conn: &Connection, user_id: i64) -> StorageResult<Kopecks> {
    let balance: Option<i64> = conn
        .query_row(
            "SELECT balance FROM users WHERE id = ?",
            params![user_id],
            |row| row.get(0),
        )
        .optional()?;
    balance
        .map(Kopecks)
        .ok_or(StorageError::UserNotFound(user_id))
}

fn insert_transaction(
    conn: &Connection,
    user_id: i64,
    kind: TransactionKind,
    amount: Kopecks,
    description: &str,
    card_number: Option<&str>,
) -> StorageResult<i64> {
    conn.execute(
        "INSERT INTO transactions (user_id, type, amount, description, card_number, status, created_at)
         VALUES (?, ?, ?, ?, ?, 'completed', ?)",
        params![
            user_id,
            kind.as_str(),
            amount.0,
            description,
            card_number,
            Utc::now().to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_with_user(balance: i64) -> (AccountStore, User) {
        let store = AccountStore::open_in_memory().unwrap();
        let user = store
            .create_user("anna@example.com", "hash", "Анна Петрова")
            .unwrap();
        if balance > 0 {
            store
                .deposit(user.id, Kopecks(balance), "Зачисление зарплаты")
                .unwrap();
        }
        (store, user)
    }

    #[test]
    fn test_create_and_find_user() {
        let store = AccountStore::open_in_memory().unwrap();
        let user = store
            .create_user("anna@example.com", "hash", "Анна Петрова")
            .unwrap();
        assert_eq!(user.balance, Kopecks::ZERO);

        let found = store
            .find_by_credentials("anna@example.com", "hash")
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);

        assert!(store
            .find_by_credentials("anna@example.com", "wrong")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let store = AccountStore::open_in_memory().unwrap();
        store.create_user("a@example.com", "h", "A").unwrap();

        let err = store.create_user("a@example.com", "h2", "B").unwrap_err();
        assert!(matches!(err, StorageError::DuplicateEmail(_)));
        assert_eq!(store.user_count().unwrap(), 1);
    }

    #[test]
    fn test_debit_updates_balance_and_records_transaction() {
        let (store, user) = store_with_user(100_000);

        let receipt = store
            .debit_for_transfer(user.id, Kopecks(25_000), "1234567890123456", "Перевод на карту 3456")
            .unwrap();
        assert_eq!(receipt.new_balance, Kopecks(75_000));

        let user = store.get_user(user.id).unwrap().unwrap();
        assert_eq!(user.balance, Kopecks(75_000));

        let history = store.recent_transactions(user.id, 10).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, receipt.transaction_id);
        assert_eq!(history[0].kind, TransactionKind::Transfer);
        assert_eq!(history[0].card_number.as_deref(), Some("1234567890123456"));
        assert_eq!(history[1].kind, TransactionKind::Deposit);
    }

    #[test]
    fn test_insufficient_funds_writes_nothing() {
        let (store, user) = store_with_user(1_000);

        let err = store
            .debit_for_transfer(user.id, Kopecks(1_001), "1234567890123456", "x")
            .unwrap_err();
        assert!(matches!(err, StorageError::InsufficientFunds { .. }));

        let user = store.get_user(user.id).unwrap().unwrap();
        assert_eq!(user.balance, Kopecks(1_000));
        assert_eq!(store.recent_transactions(user.id, 10).unwrap().len(), 1);
    }

    #[test]
    fn test_debit_exact_balance() {
        let (store, user) = store_with_user(1_000);
        let receipt = store
            .debit_for_transfer(user.id, Kopecks(1_000), "1234567890123456", "x")
            .unwrap();
        assert_eq!(receipt.new_balance, Kopecks::ZERO);
    }

    #[test]
    fn test_unknown_user() {
        let store = AccountStore::open_in_memory().unwrap();
        let err = store
            .debit_for_transfer(99, Kopecks(1), "1234567890123456", "x")
            .unwrap_err();
        assert!(matches!(err, StorageError::UserNotFound(99)));
        assert!(store.get_user(99).unwrap().is_none());
    }

    #[test]
    fn test_recent_transactions_limit() {
        let (store, user) = store_with_user(0);
        for _ in 0..5 {
            store.deposit(user.id, Kopecks(100), "top up").unwrap();
        }
        assert_eq!(store.recent_transactions(user.id, 3).unwrap().len(), 3);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempdir().unwrap();
        let config = StorageConfig::new(dir.path().join("nested").join("brill.db"));

        let id = {
            let store = AccountStore::open(&config).unwrap();
            assert!(store.ping());
            store.create_user("p@example.com", "h", "P").unwrap().id
        };

        let store = AccountStore::open(&config).unwrap();
        assert!(store.get_user(id).unwrap().is_some());
        assert_eq!(store.path(), Some(config.database_path.as_path()));
    }
}
