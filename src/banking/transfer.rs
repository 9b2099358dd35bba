//! Card transfers

use crate::banking::amount::{is_blank_amount, parse_amount_value};
use crate::banking::card::{strip_card_whitespace, Bank, CardNumber};
use crate::banking::{BankingError, BankingResult};
use crate::storage::{AccountStore, Kopecks};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Summary of a completed transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferDetails {
    /// `**** 1234`
    pub card_mask: String,
    pub amount: Kopecks,
    pub bank: String,
}

/// Outcome of a successful transfer
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOutcome {
    pub message: String,
    pub new_balance: Kopecks,
    pub transaction_id: i64,
    pub details: TransferDetails,
}

/// Executes transfers from an account to a card
pub struct TransferService {
    store: Arc<AccountStore>,
}

impl TransferService {
    pub fn new(store: Arc<AccountStore>) -> Self {
        Self { store }
    }

    /// Validate and execute a transfer.
    ///
    /// Checks run in a fixed order: all fields present, amount positive,
    /// card is 16 digits, account exists, balance covers the amount.
    pub fn transfer(
        &self,
        from_user_id: Option<i64>,
        to_card: &str,
        amount: &Value,
    ) -> BankingResult<TransferOutcome> {
        let to_card = strip_card_whitespace(to_card);
        let from_user_id = match from_user_id {
            Some(id) if id != 0 && !to_card.is_empty() && !is_blank_amount(amount) => id,
            _ => return Err(BankingError::MissingTransferFields),
        };

        let amount = parse_amount_value(amount)?;
        let card = CardNumber::parse(&to_card)?;

        let description = format!("Перевод на карту {}", card.last4());
        let receipt =
            self.store
                .debit_for_transfer(from_user_id, amount, card.as_str(), &description)?;

        let bank = card.bank();
        tracing::info!(
            user_id = from_user_id,
            transaction_id = receipt.transaction_id,
            card = %card.mask(),
            bank = ?bank,
            "Transfer completed"
        );

        Ok(TransferOutcome {
            message: success_message(amount, bank),
            new_balance: receipt.new_balance,
            transaction_id: receipt.transaction_id,
            details: TransferDetails {
                card_mask: card.mask(),
                amount,
                bank: bank.display_name().to_string(),
            },
        })
    }
}

fn success_message(amount: Kopecks, bank: Bank) -> String {
    format!("Перевод {}₽ на карту {} успешно выполнен", short_rubles(amount), bank)
}

/// Rubles without trailing zeros in the fraction: `1500`, `99.5`, `10.05`
fn short_rubles(amount: Kopecks) -> String {
    let text = amount.to_string();
    if text.contains('.') {
        text.trim_end_matches('0').to_string()
    } else {
        text
    }
}
