//! Card numbers
//!
//! Input formatting for the transfer form and the validated `CardNumber`
//! used by the transfer service.

use crate::banking::{BankingError, BankingResult};
use serde::Serialize;

/// Number of digits in a card number
pub const CARD_DIGITS: usize = 16;

/// Rendered length of a fully typed card: four groups and three spaces
pub const CARD_INPUT_MAX_LEN: usize = CARD_DIGITS + 3;

/// Format raw card input as groups of four digits.
///
/// Everything that is not an ASCII digit is dropped, whatever was pasted,
/// and input beyond 16 digits is cut off.
///
/// ```
/// use brill::banking::format_card_input;
/// assert_eq!(format_card_input("1234-5678 90123456"), "1234 5678 9012 3456");
/// assert_eq!(format_card_input("12345"), "1234 5");
/// ```
pub fn format_card_input(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CARD_DIGITS)
        .collect();

    digits
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove all whitespace from a card number as typed
pub fn strip_card_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Issuing bank, derived from the first digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bank {
    Sberbank,
    External,
}

impl Bank {
    pub fn display_name(&self) -> &'static str {
        match self {
            Bank::Sberbank => "Сбербанк",
            Bank::External => "Внешний банк",
        }
    }
}

impl std::fmt::Display for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A 16-digit card number with whitespace removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardNumber(String);

impl CardNumber {
    /// Parse a card number, ignoring whitespace.
    ///
    /// Anything other than exactly 16 ASCII digits is rejected.
    pub fn parse(raw: &str) -> BankingResult<Self> {
        let digits = strip_card_whitespace(raw);
        if digits.len() != CARD_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(BankingError::InvalidCard);
        }
        Ok(CardNumber(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn last4(&self) -> &str {
        &self.0[CARD_DIGITS - 4..]
    }

    /// Masked form, e.g. `**** 3456`
    pub fn mask(&self) -> String {
        format!("**** {}", self.last4())
    }

    pub fn bank(&self) -> Bank {
        if self.0.starts_with('2') {
            Bank::Sberbank
        } else {
            Bank::External
        }
    }
}

impl std::fmt::Display for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_card_input(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_groups_of_four() {
        assert_eq!(format_card_input(""), "");
        assert_eq!(format_card_input("1234"), "1234");
        assert_eq!(format_card_input("12345678"), "1234 5678");
        assert_eq!(format_card_input("1234567890123456"), "1234 5678 9012 3456");
    }

    #[test]
    fn test_format_ignores_pasted_noise() {
        assert_eq!(format_card_input("card: 4276-3800 1234\t5678!"), "4276 3800 1234 5678");
        assert_eq!(format_card_input("abc"), "");
        assert_eq!(format_card_input("١٢٣٤ 12"), "12");
    }

    #[test]
    fn test_format_caps_at_sixteen_digits() {
        let formatted = format_card_input("12345678901234567890");
        assert_eq!(formatted, "1234 5678 9012 3456");
        assert_eq!(formatted.len(), CARD_INPUT_MAX_LEN);
    }

    #[test]
    fn test_format_is_idempotent() {
        let once = format_card_input("1234 5678 9012");
        assert_eq!(format_card_input(&once), once);
    }

    #[test]
    fn test_parse_card() {
        let card = CardNumber::parse(" 2200 1234 5678 9012 ").unwrap();
        assert_eq!(card.as_str(), "2200123456789012");
        assert_eq!(card.last4(), "9012");
        assert_eq!(card.mask(), "**** 9012");
        assert_eq!(card.bank(), Bank::Sberbank);
        assert_eq!(card.to_string(), "2200 1234 5678 9012");

        let card = CardNumber::parse("4276123456789012").unwrap();
        assert_eq!(card.bank(), Bank::External);
        assert_eq!(card.bank().to_string(), "Внешний банк");
    }

    #[test]
    fn test_parse_rejects_wrong_length_or_non_digits() {
        assert!(matches!(
            CardNumber::parse("1234 5678 9012 345"),
            Err(BankingError::InvalidCard)
        ));
        assert!(CardNumber::parse("12345678901234567").is_err());
        assert!(CardNumber::parse("1234-5678-9012-3456").is_err());
        assert!(CardNumber::parse("123456789012345a").is_err());
        assert!(CardNumber::parse("").is_err());
    }
}
