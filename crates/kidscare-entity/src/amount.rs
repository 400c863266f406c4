//! Decimal money amounts as exchanged with the billing endpoints.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::ValidationError;

/// A decimal amount kept as its exact decimal text.
///
/// The API serializes decimals as JSON strings; numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount(String);

impl Amount {
    /// Wrap decimal text without checking it.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The decimal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the text is a plain finite decimal (`12`, `-3.50`).
    pub fn is_decimal(&self) -> bool {
        let s = self.0.strip_prefix('-').unwrap_or(&self.0);
        let mut parts = s.splitn(2, '.');
        let whole = parts.next().unwrap_or("");
        let frac = parts.next();
        let digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        digits(whole) && frac.is_none_or(digits)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                Ok(Amount(v.trim().to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                if v.is_finite() {
                    Ok(Amount(v.to_string()))
                } else {
                    Err(E::custom("amount must be finite"))
                }
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Field validator for amounts submitted from the console.
pub fn validate_amount(amount: &Amount) -> Result<(), ValidationError> {
    if amount.is_decimal() {
        Ok(())
    } else {
        Err(ValidationError::new("decimal"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_string_and_number() {
        let a: Amount = serde_json::from_str("\"125.50\"").unwrap();
        assert_eq!(a.as_str(), "125.50");
        let b: Amount = serde_json::from_str("40").unwrap();
        assert_eq!(b.as_str(), "40");
        let c: Amount = serde_json::from_str("12.5").unwrap();
        assert_eq!(c.as_str(), "12.5");
    }

    #[test]
    fn test_decimal_check() {
        assert!(Amount::new("12").is_decimal());
        assert!(Amount::new("-3.50").is_decimal());
        assert!(!Amount::new("12.").is_decimal());
        assert!(!Amount::new("abc").is_decimal());
        assert!(!Amount::new("").is_decimal());
    }
}
