//! Serde helpers for ERP payloads that mix numbers and numeric strings.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

fn number_from(value: &Value) -> Result<Option<f64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| format!("bad number {n}")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("'{s}' is not a number")),
        other => Err(format!("expected a number, got {other}")),
    }
}

/// `12.5`, `"12.5"` and `"1,200.00"`; null or blank gives `0.0`
pub fn f64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(d)?;
    number_from(&value)
        .map(|v| v.unwrap_or(0.0))
        .map_err(de::Error::custom)
}

pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(d)?;
    number_from(&value).map_err(de::Error::custom)
}

pub fn u64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(d)?;
    match number_from(&value).map_err(de::Error::custom)? {
        Some(v) if v >= 0.0 => Ok(v as u64),
        Some(v) => Err(de::Error::custom(format!("negative count {v}"))),
        None => Ok(0),
    }
}

/// Identifiers arrive as `17` or `"17"`; both become `"17"`
pub fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected an id, got {other}"))),
    }
}

pub fn opt_id_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!("expected an id, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "id_string")]
        id: String,
        #[serde(deserialize_with = "f64_or_zero")]
        amount: f64,
        #[serde(default, deserialize_with = "opt_f64")]
        discount: Option<f64>,
        #[serde(default, deserialize_with = "u64_or_zero")]
        count: u64,
    }

    #[test]
    fn numbers_and_strings_are_accepted() {
        let p: Probe =
            serde_json::from_value(json!({"id": 17, "amount": "1,200.50", "count": "3"})).unwrap();
        assert_eq!(p.id, "17");
        assert_eq!(p.amount, 1200.5);
        assert_eq!(p.discount, None);
        assert_eq!(p.count, 3);
    }

    #[test]
    fn null_amount_is_zero_and_text_is_rejected() {
        let p: Probe = serde_json::from_value(json!({"id": "A1", "amount": null})).unwrap();
        assert_eq!(p.amount, 0.0);

        let err = serde_json::from_value::<Probe>(json!({"id": "A1", "amount": "n/a"}));
        assert!(err.is_err());
    }
}
