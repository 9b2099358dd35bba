//! BRILL Account Store
//!
//! Persistent accounts and transaction history:
//!
//! - **types**: Core data structures (User, Kopecks, Transaction)
//! - **accounts**: SQLite-backed store
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use brill::storage::{AccountStore, Kopecks, StorageConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = AccountStore::open(&StorageConfig::new("./brill.db"))?;
//!
//!     let user = store.create_user("ivan@example.com", "<sha256>", "Иван Иванов")?;
//!     store.deposit(user.id, Kopecks(8_500_000), "Зачисление зарплаты")?;
//!
//!     let receipt = store.debit_for_transfer(
//!         user.id,
//!         Kopecks(250_000),
//!         "2200123412341234",
//!         "Перевод на карту 1234",
//!     )?;
//!     println!("New balance: {}", receipt.new_balance);
//!
//!     Ok(())
//! }
//! ```

pub mod accounts;
pub mod error;
pub mod types;

pub use accounts::{AccountStore, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use types::{Kopecks, Transaction, TransactionKind, TransferReceipt, User};
