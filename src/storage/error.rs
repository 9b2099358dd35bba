//! Account store error types
//!
//! Defines all errors that can occur in the storage layer.

use thiserror::Error;

/// Errors that can occur in the account store
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed (creating the database directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite rejected the statement or the connection failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be decoded
    #[error("Corrupt data: {0}")]
    Corruption(String),

    /// No user with the given id exists
    #[error("User not found: {0}")]
    UserNotFound(i64),

    /// The email is already registered
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Balance is lower than the requested debit
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: i64, requested: i64 },

    /// Mutex guarding the connection was poisoned
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::UserNotFound(42);
        assert_eq!(err.to_string(), "User not found: 42");

        let err = StorageError::InsufficientFunds {
            balance: 100,
            requested: 500,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: balance 100, requested 500"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let storage_err: StorageError = io_err.into();
        assert!(matches!(storage_err, StorageError::Io(_)));
    }
}
