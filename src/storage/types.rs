//! Core data types for the BRILL account store
//!
//! - `Kopecks`: money amount in minor units
//! - `User`: account as exposed on the wire
//! - `Transaction`: a recorded balance movement

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Money amount in kopecks (1/100 of a ruble)
///
/// Serialized as a JSON number of rubles, which is what the site and the
/// terminal client expect for `balance`, `amount` and `new_balance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kopecks(pub i64);

impl Kopecks {
    pub const ZERO: Kopecks = Kopecks(0);

    /// Convert a ruble value, rounding to the nearest kopeck.
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 range.
    pub fn from_rubles(rubles: f64) -> Option<Self> {
        if !rubles.is_finite() {
            return None;
        }
        let minor = (rubles * 100.0).round();
        if minor.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Kopecks(minor as i64))
    }

    /// Value in rubles
    pub fn as_rubles(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_sub(self, other: Kopecks) -> Option<Kopecks> {
        self.0.checked_sub(other.0).map(Kopecks)
    }
}

impl std::fmt::Display for Kopecks {
    /// Whole amounts print without a fraction ("1500"), others with two
    /// digits ("1500.50").
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let (rubles, kopecks) = (abs / 100, abs % 100);
        if kopecks == 0 {
            write!(f, "{}{}", sign, rubles)
        } else {
            write!(f, "{}{}.{:02}", sign, rubles, kopecks)
        }
    }
}

impl Serialize for Kopecks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_rubles())
    }
}

impl<'de> Deserialize<'de> for Kopecks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rubles = f64::deserialize(deserializer)?;
        Kopecks::from_rubles(rubles)
            .ok_or_else(|| serde::de::Error::custom("amount out of range"))
    }
}

/// An account as exposed to clients
///
/// This is also the record the site caches under `brill_user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub balance: Kopecks,
    /// RFC 3339 UTC
    pub created_at: String,
}

impl User {
    /// First word of the full name, used for greetings
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(self.full_name.as_str())
    }
}

/// Kind of balance movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Outgoing transfer to a card
    Transfer,
    /// Incoming credit
    Deposit,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Transfer => "transfer",
            TransactionKind::Deposit => "deposit",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transfer" => Ok(TransactionKind::Transfer),
            "deposit" => Ok(TransactionKind::Deposit),
            other => Err(format!("unknown transaction type: {}", other)),
        }
    }
}

/// A recorded balance movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Kopecks,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl Transaction {
    /// Signed amount as seen by the account holder: transfers are negative
    pub fn signed_amount(&self) -> Kopecks {
        match self.kind {
            TransactionKind::Transfer => Kopecks(-self.amount.0),
            TransactionKind::Deposit => self.amount,
        }
    }
}

/// Result of a completed debit
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub transaction_id: i64,
    pub new_balance: Kopecks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kopecks_from_rubles() {
        assert_eq!(Kopecks::from_rubles(1500.0), Some(Kopecks(150_000)));
        assert_eq!(Kopecks::from_rubles(0.1 + 0.2), Some(Kopecks(30)));
        assert_eq!(Kopecks::from_rubles(f64::NAN), None);
        assert_eq!(Kopecks::from_rubles(f64::INFINITY), None);
    }

    #[test]
    fn test_kopecks_display() {
        assert_eq!(Kopecks(150_000).to_string(), "1500");
        assert_eq!(Kopecks(150_050).to_string(), "1500.50");
        assert_eq!(Kopecks(5).to_string(), "0.05");
        assert_eq!(Kopecks(-250).to_string(), "-2.50");
    }

    #[test]
    fn test_user_serializes_balance_as_rubles() {
        let user = User {
            id: 7,
            email: "ivan@example.com".to_string(),
            full_name: "Иван Иванов".to_string(),
            balance: Kopecks(1_234_550),
            created_at: "2024-11-18T10:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["balance"], serde_json::json!(12345.5));

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
        assert_eq!(back.first_name(), "Иван");
    }

    #[test]
    fn test_signed_amount() {
        let tx = Transaction {
            id: 1,
            user_id: 1,
            kind: TransactionKind::Transfer,
            amount: Kopecks(2500),
            description: "Перевод на карту 3456".to_string(),
            card_number: Some("1234567890123456".to_string()),
            status: "completed".to_string(),
            created_at: "2024-11-17T00:00:00+00:00".to_string(),
        };
        assert_eq!(tx.signed_amount(), Kopecks(-2500));
    }
}
