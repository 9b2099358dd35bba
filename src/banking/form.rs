//! Transfer form state and client-side validation
//!
//! Mirrors the dashboard transfer dialog: the card field is reformatted on
//! every edit, and nothing is sent until both fields validate.

use crate::banking::amount::parse_amount_text;
use crate::banking::card::{format_card_input, CardNumber};
use crate::storage::Kopecks;
use thiserror::Error;

/// Rejections raised before a transfer request is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferFormError {
    #[error("Номер карты должен содержать 16 цифр")]
    InvalidCard,

    #[error("Укажите корректную сумму")]
    InvalidAmount,
}

/// A transfer that passed client-side validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTransfer {
    pub card: CardNumber,
    pub amount: Kopecks,
}

/// Current contents of the transfer form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferForm {
    card: String,
    amount: String,
}

impl TransferForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the card field; the stored value is always formatted
    pub fn set_card(&mut self, raw: &str) {
        self.card = format_card_input(raw);
    }

    pub fn set_amount(&mut self, raw: &str) {
        self.amount = raw.to_string();
    }

    pub fn card(&self) -> &str {
        &self.card
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Clear both fields after a successful transfer
    pub fn reset(&mut self) {
        self.card.clear();
        self.amount.clear();
    }

    /// Validate the form: card first, then amount
    pub fn validate(&self) -> Result<ValidTransfer, TransferFormError> {
        let card = CardNumber::parse(&self.card).map_err(|_| TransferFormError::InvalidCard)?;
        let amount =
            parse_amount_text(&self.amount).map_err(|_| TransferFormError::InvalidAmount)?;
        Ok(ValidTransfer { card, amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_field_is_always_grouped() {
        let mut form = TransferForm::new();
        form.set_card("2200-1234 5678.9012 extra 99");
        assert_eq!(form.card(), "2200 1234 5678 9012");
    }

    #[test]
    fn test_valid_form() {
        let mut form = TransferForm::new();
        form.set_card("2200123456789012");
        form.set_amount("1000");

        let transfer = form.validate().unwrap();
        assert_eq!(transfer.card.as_str(), "2200123456789012");
        assert_eq!(transfer.amount, Kopecks(100_000));
    }

    #[test]
    fn test_short_card_rejected_before_amount() {
        let mut form = TransferForm::new();
        form.set_card("2200 1234");
        form.set_amount("-5");
        assert_eq!(form.validate(), Err(TransferFormError::InvalidCard));
    }

    #[test]
    fn test_bad_amounts_rejected() {
        let mut form = TransferForm::new();
        form.set_card("2200123456789012");

        for amount in ["", "0", "-1", "abc"] {
            form.set_amount(amount);
            assert_eq!(form.validate(), Err(TransferFormError::InvalidAmount));
        }
    }

    #[test]
    fn test_reset() {
        let mut form = TransferForm::new();
        form.set_card("1234");
        form.set_amount("10");
        form.reset();
        assert_eq!(form, TransferForm::default());
    }
}
