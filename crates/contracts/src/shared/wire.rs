//! Lenient field decoders for the remote API.
//!
//! The server serializes the same column as a number in one operation and
//! as a string in another, and sends `null` for empty text. These helpers
//! normalize that at the deserialization boundary.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text column: `null` becomes `""`, numbers are rendered as text
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// Numeric column: numbers or numeric strings, `null`/`""` become `0`
pub fn deserialize_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid number: {}", n))),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("Invalid number '{}': {}", s, e))),
        other => Err(serde::de::Error::custom(format!("Invalid number: {}", other))),
    }
}

/// Only a JSON string counts; any other shape is treated as absent
pub fn deserialize_strict_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_text")]
        name: String,
        #[serde(default, deserialize_with = "deserialize_number")]
        qty: f64,
    }

    #[test]
    fn test_text_and_number_normalization() {
        let row: Row = serde_json::from_str(r#"{"name": 1001, "qty": "3.5"}"#).unwrap();
        assert_eq!(row.name, "1001");
        assert_eq!(row.qty, 3.5);

        let row: Row = serde_json::from_str(r#"{"name": null, "qty": null}"#).unwrap();
        assert_eq!(row.name, "");
        assert_eq!(row.qty, 0.0);
    }

    #[test]
    fn test_invalid_number() {
        assert!(serde_json::from_str::<Row>(r#"{"qty": "three"}"#).is_err());
    }
}
