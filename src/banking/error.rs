//! Banking error types
//!
//! The display text of each variant is the message shown to the customer,
//! so the site and the terminal client can surface it unchanged.

use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BankingError {
    #[error("Email и пароль обязательны")]
    MissingCredentials,

    #[error("ФИО обязательно")]
    MissingFullName,

    #[error("Пользователь с таким email уже существует")]
    EmailTaken,

    #[error("Неверный email или пароль")]
    InvalidCredentials,

    #[error("Invalid action")]
    InvalidAction,

    #[error("Все поля обязательны")]
    MissingTransferFields,

    #[error("Некорректная сумма")]
    InvalidAmount,

    #[error("Номер карты должен содержать 16 цифр")]
    InvalidCard,

    #[error("Пользователь не найден")]
    UserNotFound,

    #[error("Недостаточно средств")]
    InsufficientFunds,

    #[error("Ошибка хранилища: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for BankingError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UserNotFound(_) => BankingError::UserNotFound,
            StorageError::DuplicateEmail(_) => BankingError::EmailTaken,
            StorageError::InsufficientFunds { .. } => BankingError::InsufficientFunds,
            other => BankingError::Storage(other),
        }
    }
}

pub type BankingResult<T> = Result<T, BankingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_map_to_customer_errors() {
        let err: BankingError = StorageError::UserNotFound(3).into();
        assert!(matches!(err, BankingError::UserNotFound));
        assert_eq!(err.to_string(), "Пользователь не найден");

        let err: BankingError = StorageError::InsufficientFunds {
            balance: 1,
            requested: 2,
        }
        .into();
        assert_eq!(err.to_string(), "Недостаточно средств");

        let err: BankingError = StorageError::Lock("poisoned".to_string()).into();
        assert!(matches!(err, BankingError::Storage(_)));
    }
}
