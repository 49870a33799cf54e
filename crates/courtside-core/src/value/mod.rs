//! Module: value
//! Responsibility: sort-key values shared by sort tables, cursors, and sources.
//! Does not own: field resolution or ordering direction.
//! Boundary: the only value shape that crosses the cursor wire format.

mod compare;


pub use compare::canonical_cmp;

// Wire tag for floats JSON numbers cannot carry.
const FLOAT_BITS_KEY: &str = "f64Bits";

use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};
use std::fmt;

///
/// Value
///
/// One snapshot of a sortable attribute.
/// Non-finite floats cross the wire as `{"f64Bits": <u64>}` so they stay
/// distinct from null.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Return the scalar kind, or `None` for null.
    #[must_use]
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) => Some(ValueKind::Int),
            Self::Float(_) => Some(ValueKind::Float),
            Self::Text(_) => Some(ValueKind::Text),
        }
    }

    /// Convert an optional attribute into a value, mapping `None` to null.
    pub fn from_option<T: Into<Self>>(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }

    pub(crate) fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(v) => JsonValue::Bool(*v),
            Self::Int(v) => JsonValue::Number(JsonNumber::from(*v)),
            Self::Float(v) => JsonNumber::from_f64(*v).map_or_else(
                || {
                    let mut tagged = JsonMap::new();
                    tagged.insert(FLOAT_BITS_KEY.to_string(), JsonValue::from(v.to_bits()));
                    JsonValue::Object(tagged)
                },
                JsonValue::Number,
            ),
            Self::Text(v) => JsonValue::String(v.clone()),
        }
    }

    // Nested arrays and objects are not sort keys, apart from the float tag.
    pub(crate) fn from_json(json: &JsonValue) -> Option<Self> {
        match json {
            JsonValue::Null => Some(Self::Null),
            JsonValue::Bool(v) => Some(Self::Bool(*v)),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            JsonValue::String(v) => Some(Self::Text(v.clone())),
            JsonValue::Object(tagged) if tagged.len() == 1 => tagged
                .get(FLOAT_BITS_KEY)
                .and_then(JsonValue::as_u64)
                .map(|bits| Self::Float(f64::from_bits(bits))),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    pub(crate) fn insert_into(&self, key: &str, map: &mut JsonMap<String, JsonValue>) {
        map.insert(key.to_string(), self.to_json());
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

///
/// ValueKind
///
/// Declared scalar kind of a sortable field.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
}

impl ValueKind {
    /// Whether `value` is acceptable for a field of this kind.
    /// Integers widen into float fields.
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Bool, Value::Bool(_))
                | (Self::Int, Value::Int(_))
                | (Self::Float, Value::Float(_) | Value::Int(_))
                | (Self::Text, Value::Text(_))
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
        };
        write!(f, "{label}")
    }
}
