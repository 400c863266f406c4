//! Record-id fields that accept JSON integers or their decimal text.
//!
//! Form input arrives as text (`child_id=3`), API bodies carry numbers.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a record id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::custom(format!("record id {v} is out of range")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        v.trim()
            .parse()
            .map_err(|_| E::custom(format!("'{v}' is not a record id")))
    }
}

/// `deserialize_with` for `i64` id fields.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    deserializer.deserialize_any(IdVisitor)
}

/// `deserialize_with` for `Option<i64>` id fields; pair with `#[serde(default)]`.
pub fn deserialize_option<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    struct Id(#[serde(deserialize_with = "deserialize")] i64);

    Ok(Option::<Id>::deserialize(deserializer)?.map(|Id(id)| id))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(deserialize_with = "super::deserialize")]
        child_id: i64,
        #[serde(default, deserialize_with = "super::deserialize_option")]
        staff_id: Option<i64>,
    }

    #[test]
    fn test_accepts_text_and_numbers() {
        let form: Form = serde_json::from_value(json!({"child_id": "12", "staff_id": 4})).unwrap();
        assert_eq!(form.child_id, 12);
        assert_eq!(form.staff_id, Some(4));

        let form: Form = serde_json::from_value(json!({"child_id": 3})).unwrap();
        assert_eq!(form.staff_id, None);

        let form: Form = serde_json::from_value(json!({"child_id": 3, "staff_id": null})).unwrap();
        assert_eq!(form.staff_id, None);
    }

    #[test]
    fn test_rejects_non_numeric_text() {
        let err = serde_json::from_value::<Form>(json!({"child_id": "abc"})).unwrap_err();
        assert!(err.to_string().contains("not a record id"));
    }
}
