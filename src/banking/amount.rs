//! Transfer amounts
//!
//! Amounts arrive either as a JSON number or as a numeric string. Both are
//! converted to kopecks and must be strictly positive.

use crate::banking::{BankingError, BankingResult};
use crate::storage::Kopecks;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+([.,]\d*)?|[.,]\d+)$").expect("amount pattern is valid")
    })
}

/// Parse a decimal ruble amount typed by a person.
///
/// Accepts `1500`, `1500.5`, `1500,50`; surrounding whitespace is ignored.
/// The result is rounded to whole kopecks and must be positive.
pub fn parse_amount_text(text: &str) -> BankingResult<Kopecks> {
    let text = text.trim();
    if !amount_pattern().is_match(text) {
        return Err(BankingError::InvalidAmount);
    }

    let rubles: f64 = text
        .replace(',', ".")
        .parse()
        .map_err(|_| BankingError::InvalidAmount)?;

    positive_kopecks(rubles)
}

/// Parse an amount field from a JSON request body
pub fn parse_amount_value(value: &Value) -> BankingResult<Kopecks> {
    match value {
        Value::Number(n) => positive_kopecks(n.as_f64().ok_or(BankingError::InvalidAmount)?),
        Value::String(s) => parse_amount_text(s),
        _ => Err(BankingError::InvalidAmount),
    }
}

/// JSON amount values that count as "not provided"
pub fn is_blank_amount(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Format for display the way the Russian locale does: thousands grouped
/// with a non-breaking space, comma before kopecks when there are any.
///
/// ```
/// use brill::banking::format_rubles;
/// use brill::storage::Kopecks;
///
/// assert_eq!(format_rubles(Kopecks(1_000_000)), "10\u{a0}000");
/// ```
pub fn format_rubles(amount: Kopecks) -> String {
    let sign = if amount.0 < 0 { "-" } else { "" };
    let abs = amount.0.unsigned_abs();
    let (rubles, kopecks) = (abs / 100, abs % 100);

    let digits = rubles.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }

    if kopecks == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{:02}", sign, grouped, kopecks)
    }
}

fn positive_kopecks(rubles: f64) -> BankingResult<Kopecks> {
    match Kopecks::from_rubles(rubles) {
        Some(k) if k.is_positive() => Ok(k),
        _ => Err(BankingError::InvalidAmount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_amount_text("1500").unwrap(), Kopecks(150_000));
        assert_eq!(parse_amount_text(" 1500.5 ").unwrap(), Kopecks(150_050));
        assert_eq!(parse_amount_text("99,99").unwrap(), Kopecks(9_999));
        assert_eq!(parse_amount_text(".5").unwrap(), Kopecks(50));
    }

    #[test]
    fn test_parse_text_rejects_non_positive_and_garbage() {
        for input in ["", "0", "-10", "0.001", "abc", "12abc", "1e3", "1 000", "NaN", "inf"] {
            assert!(
                matches!(parse_amount_text(input), Err(BankingError::InvalidAmount)),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_json_value() {
        assert_eq!(parse_amount_value(&json!(250)).unwrap(), Kopecks(25_000));
        assert_eq!(parse_amount_value(&json!(0.5)).unwrap(), Kopecks(50));
        assert_eq!(parse_amount_value(&json!("250.25")).unwrap(), Kopecks(25_025));
        assert!(parse_amount_value(&json!(-1)).is_err());
        assert!(parse_amount_value(&json!(true)).is_err());
        assert!(parse_amount_value(&json!([1])).is_err());
    }

    #[test]
    fn test_format_rubles() {
        assert_eq!(format_rubles(Kopecks(0)), "0");
        assert_eq!(format_rubles(Kopecks(99_900)), "999");
        assert_eq!(format_rubles(Kopecks(8_500_000)), "85\u{a0}000");
        assert_eq!(format_rubles(Kopecks(123_456_789)), "1\u{a0}234\u{a0}567,89");
        assert_eq!(format_rubles(Kopecks(-250_050)), "-2\u{a0}500,50");
    }

    #[test]
    fn test_blank_amounts() {
        assert!(is_blank_amount(&Value::Null));
        assert!(is_blank_amount(&json!(0)));
        assert!(is_blank_amount(&json!("")));
        assert!(!is_blank_amount(&json!(-5)));
        assert!(!is_blank_amount(&json!("0")));
    }
}
