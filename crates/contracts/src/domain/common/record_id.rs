use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Server-assigned numeric identifier.
///
/// The remote API uses `0` for "not yet created" and is inconsistent about
/// sending ids as JSON numbers or as numeric strings, so deserialization
/// accepts both and maps `null`/`""` to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Id sent for records the server has not created yet
    pub const NEW: RecordId = RecordId(0);

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_new(&self) -> bool {
        self.0 == 0
    }

    /// `None` for the "not yet created" id
    pub fn non_zero(self) -> Option<Self> {
        if self.is_new() {
            None
        } else {
            Some(self)
        }
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(RecordId)
            .map_err(|e| format!("Invalid id '{}': {}", s, e))
    }

    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(Self::NEW),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .map(RecordId)
                .ok_or_else(|| format!("Invalid id: {}", n)),
            Value::String(s) if s.trim().is_empty() => Ok(Self::NEW),
            Value::String(s) => Self::from_string(s),
            other => Err(format!("Invalid id: {}", other)),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RecordId::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Foreign keys: missing, `null`, `""` and `0` all mean "no selection".
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    RecordId::from_value(&value)
        .map(RecordId::non_zero)
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        id: RecordId,
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        parent: Option<RecordId>,
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let row: Row = serde_json::from_str(r#"{"id": 42, "parent": "7"}"#).unwrap();
        assert_eq!(row.id, RecordId(42));
        assert_eq!(row.parent, Some(RecordId(7)));
    }

    #[test]
    fn zero_and_null_foreign_keys_are_none() {
        let row: Row = serde_json::from_str(r#"{"id": "", "parent": 0}"#).unwrap();
        assert!(row.id.is_new());
        assert_eq!(row.parent, None);

        let row: Row = serde_json::from_str(r#"{"id": 1, "parent": null}"#).unwrap();
        assert_eq!(row.parent, None);

        let row: Row = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(row.parent, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Row>(r#"{"id": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"id": 1.5}"#).is_err());
    }
}
