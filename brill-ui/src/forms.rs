//! Form Helpers
//!
//! Pure input handling for the transfer dialog and money display. Nothing
//! here touches the DOM, so it is tested natively.

/// Digits in a card number
pub const CARD_DIGITS: usize = 16;

/// Rendered length of a full card number: 16 digits plus 3 spaces
pub const CARD_INPUT_MAX_LEN: usize = 19;

pub const INVALID_CARD: &str = "Номер карты должен содержать 16 цифр";
pub const INVALID_AMOUNT: &str = "Укажите корректную сумму";

/// Reformat whatever was typed or pasted into the card field.
///
/// Every non-digit is dropped, at most 16 digits are kept, and the result is
/// grouped in blocks of four separated by single spaces.
pub fn format_card_input(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CARD_DIGITS)
        .collect();

    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A transfer that may be sent
#[derive(Debug, Clone, PartialEq)]
pub struct TransferInput {
    /// 16 digits, no spaces
    pub card: String,
    /// Rubles
    pub amount: f64,
}

/// Client-side checks before a transfer is sent; the card is checked first.
pub fn validate_transfer(card: &str, amount: &str) -> Result<TransferInput, &'static str> {
    let card: String = card.chars().filter(|c| !c.is_whitespace()).collect();
    if card.len() != CARD_DIGITS || !card.chars().all(|c| c.is_ascii_digit()) {
        return Err(INVALID_CARD);
    }

    let amount = parse_amount(amount).ok_or(INVALID_AMOUNT)?;

    Ok(TransferInput { card, amount })
}

/// Positive finite number; a decimal comma is accepted
fn parse_amount(text: &str) -> Option<f64> {
    let amount: f64 = text.trim().replace(',', ".").parse().ok()?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

/// Russian-locale money: thousands grouped with a non-breaking space,
/// comma before kopecks when there are any. `1500.5` -> `1 500,50`.
pub fn format_rubles(amount: f64) -> String {
    let kopecks = (amount * 100.0).round() as i64;
    let sign = if kopecks < 0 { "-" } else { "" };
    let abs = kopecks.unsigned_abs();
    let (rubles, rest) = (abs / 100, abs % 100);

    let grouped = group_thousands(rubles);
    if rest == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{:02}", sign, grouped, rest)
    }
}

/// Balance style: always two decimals and the ruble sign
pub fn format_currency(amount: f64) -> String {
    let kopecks = (amount * 100.0).round() as i64;
    let sign = if kopecks < 0 { "-" } else { "" };
    let abs = kopecks.unsigned_abs();
    format!("{}{},{:02}\u{a0}₽", sign, group_thousands(abs / 100), abs % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }
    grouped
}

/// First word of a full name, for greetings
pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or(full_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_card_groups_of_four() {
        assert_eq!(format_card_input("2200123456789012"), "2200 1234 5678 9012");
        assert_eq!(format_card_input("22001"), "2200 1");
        assert_eq!(format_card_input(""), "");
    }

    #[test]
    fn test_format_card_any_paste() {
        assert_eq!(format_card_input("2200-1234-5678-9012"), "2200 1234 5678 9012");
        assert_eq!(format_card_input("  22 00 12ab34 "), "2200 1234");
        assert_eq!(format_card_input("card: 4276 1234 5678 9012 345"), "4276 1234 5678 9012");

        let formatted = format_card_input("1111222233334444555566667777");
        assert_eq!(formatted.len(), CARD_INPUT_MAX_LEN);
    }

    #[test]
    fn test_validate_transfer() {
        let ok = validate_transfer("2200 1234 5678 9012", "1500").unwrap();
        assert_eq!(ok.card, "2200123456789012");
        assert_eq!(ok.amount, 1500.0);

        assert_eq!(validate_transfer("4276123456789012", " 99,5 ").unwrap().amount, 99.5);
    }

    #[test]
    fn test_validate_transfer_rejects() {
        assert_eq!(validate_transfer("2200 1234 5678 901", "10"), Err(INVALID_CARD));
        assert_eq!(validate_transfer("2200 1234 5678 90123", "10"), Err(INVALID_CARD));
        assert_eq!(validate_transfer("2200-1234-5678-9012", "10"), Err(INVALID_CARD));

        for amount in ["", "0", "-5", "abc", "NaN", "inf"] {
            assert_eq!(
                validate_transfer("2200123456789012", amount),
                Err(INVALID_AMOUNT),
                "{amount:?}"
            );
        }

        // Card is reported first when both are wrong
        assert_eq!(validate_transfer("12", "abc"), Err(INVALID_CARD));
    }

    #[test]
    fn test_format_rubles() {
        assert_eq!(format_rubles(0.0), "0");
        assert_eq!(format_rubles(85000.0), "85\u{a0}000");
        assert_eq!(format_rubles(-2500.0), "-2\u{a0}500");
        assert_eq!(format_rubles(1234567.89), "1\u{a0}234\u{a0}567,89");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(10000.0), "10\u{a0}000,00\u{a0}₽");
        assert_eq!(format_currency(0.5), "0,50\u{a0}₽");
    }

    #[test]
    fn test_first_name() {
        assert_eq!(first_name("Иван Иванов"), "Иван");
        assert_eq!(first_name("Анна"), "Анна");
        assert_eq!(first_name(""), "");
    }
}
