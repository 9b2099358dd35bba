//! Banking rules
//!
//! Everything that decides whether a customer request is acceptable:
//!
//! - **card**: card-number formatting and validation
//! - **amount**: ruble amounts from text or JSON
//! - **form**: client-side transfer form
//! - **auth**: login / registration
//! - **transfer**: debit an account for a card transfer

pub mod amount;
pub mod auth;
pub mod card;
pub mod error;
pub mod form;
pub mod transfer;

pub use amount::{format_rubles, parse_amount_text, parse_amount_value};
pub use auth::{hash_password, AuthAction, AuthService, AuthSession};
pub use card::{format_card_input, Bank, CardNumber};
pub use error::{BankingError, BankingResult};
pub use form::{TransferForm, TransferFormError, ValidTransfer};
pub use transfer::{TransferDetails, TransferOutcome, TransferService};
