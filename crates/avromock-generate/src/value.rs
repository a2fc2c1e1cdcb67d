use chrono::NaiveDate;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Generated value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MockValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(String),
    Bytes(Vec<u8>),
    /// `fixed` token, one ASCII character per declared byte.
    Fixed(String),
    Date(NaiveDate),
    Array(Vec<MockValue>),
    Map(Vec<(String, MockValue)>),
    /// Record fields in declaration order.
    Record(Vec<(String, MockValue)>),
    /// Union value nested under its branch key.
    Union {
        branch: String,
        value: Box<MockValue>,
    },
}

impl MockValue {
    pub fn is_null(&self) -> bool {
        matches!(self, MockValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MockValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MockValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MockValue::Int(value) => Some(*value as f64),
            MockValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MockValue::Text(value) | MockValue::Uuid(value) | MockValue::Fixed(value) => {
                Some(value.as_str())
            }
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            MockValue::Bytes(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            MockValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[MockValue]> {
        match self {
            MockValue::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Entries of a record or map, in insertion order.
    pub fn entries(&self) -> Option<&[(String, MockValue)]> {
        match self {
            MockValue::Record(entries) | MockValue::Map(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    /// Field of a record, entry of a map, or the value of a matching union branch.
    pub fn get(&self, key: &str) -> Option<&MockValue> {
        match self {
            MockValue::Record(entries) | MockValue::Map(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            MockValue::Union { branch, value } if branch == key => Some(value.as_ref()),
            _ => None,
        }
    }

    /// Branch key of a wrapped union value.
    pub fn branch(&self) -> Option<&str> {
        match self {
            MockValue::Union { branch, .. } => Some(branch.as_str()),
            _ => None,
        }
    }

    /// Number of elements, entries or characters/bytes for leaf buffers.
    pub fn len(&self) -> usize {
        match self {
            MockValue::Text(value) | MockValue::Uuid(value) | MockValue::Fixed(value) => {
                value.len()
            }
            MockValue::Bytes(value) => value.len(),
            MockValue::Array(items) => items.len(),
            MockValue::Map(entries) | MockValue::Record(entries) => entries.len(),
            MockValue::Union { .. } => 1,
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to JSON. Object keys follow `serde_json`'s map ordering.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for MockValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MockValue::Null => serializer.serialize_unit(),
            MockValue::Bool(value) => serializer.serialize_bool(*value),
            MockValue::Int(value) => serializer.serialize_i64(*value),
            MockValue::Float(value) => serializer.serialize_f64(*value),
            MockValue::Text(value) | MockValue::Uuid(value) | MockValue::Fixed(value) => {
                serializer.serialize_str(value)
            }
            MockValue::Bytes(value) => serializer.serialize_str(&hex::encode(value)),
            MockValue::Date(value) => {
                serializer.serialize_str(&value.format("%Y-%m-%d").to_string())
            }
            MockValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            MockValue::Map(entries) | MockValue::Record(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            MockValue::Union { branch, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(branch, value)?;
                map.end()
            }
        }
    }
}
