//! The value tree that every jsonkit stage operates on.
//!
//! `Value` mirrors JSON but keeps two extra leaf types that plain JSON cannot
//! carry (dates and binary). Those leaves are *opaque*: key census, minify and
//! unminify never descend into them, and only the extended codec knows how to
//! put them on the wire without losing their type.
//!
//! Objects use [`IndexMap`] so that key insertion order survives every
//! rewrite, matching `serde_json`'s `preserve_order` behaviour.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use indexmap::IndexMap;

/// Ordered string-keyed mapping used for `Value::Object`.
pub type Map = IndexMap<String, Value>;

/// Binary payload with a BSON-style subtype byte (`0x00` is generic binary).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Binary {
    pub subtype: u8,
    pub bytes: Vec<u8>,
}

impl Binary {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            subtype: 0,
            bytes: bytes.into(),
        }
    }
}

/// A jsonkit document value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// A point in time. The wire formats carry millisecond precision.
    Date(DateTime<Utc>),
    Binary(Binary),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order.
    Object(Map),
}

/// Coarse shape of a [`Value`], as seen by the tree walkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Sequence,
    Mapping,
    /// A leaf that carries structure of its own but is never descended into.
    Opaque,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null | Value::Bool(_) | Value::Integer(_) | Value::Float(_) | Value::String(_) => {
                ValueKind::Scalar
            }
            Value::Date(_) | Value::Binary(_) => ValueKind::Opaque,
            Value::Array(_) => ValueKind::Sequence,
            Value::Object(_) => ValueKind::Mapping,
        }
    }

    /// Build a `Date` from milliseconds since the Unix epoch.
    ///
    /// Returns `None` when the timestamp is outside chrono's supported range.
    pub fn date_from_millis(millis: i64) -> Option<Value> {
        Utc.timestamp_millis_opt(millis).single().map(Value::Date)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` if this value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

/// Format a date the way both wire modes print it: RFC 3339, milliseconds, `Z`.
pub(crate) fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// Primitive conversions
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Value::Date(date)
    }
}

impl From<Binary> for Value {
    fn from(bin: Binary) -> Self {
        Value::Binary(bin)
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

// ============================================================================
// Plain JSON mapping
// ============================================================================

/// Plain (non-extended) lowering to JSON.
///
/// This is lossy for the opaque leaves: dates become ISO-8601 strings, binary
/// becomes an array of byte numbers, and non-finite floats become `null`.
impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Date(date) => serde_json::Value::String(format_date(date)),
            Value::Binary(bin) => {
                serde_json::Value::Array(bin.bytes.iter().map(|b| serde_json::Value::from(*b)).collect())
            }
            Value::Array(arr) => serde_json::Value::Array(arr.iter().map(Into::into).collect()),
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), child.into()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        (&value).into()
    }
}

/// Plain lifting from JSON. Integers beyond the `i64` range become floats.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number_to_value(&n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(key, child)| (key, child.into())).collect())
            }
        }
    }
}

pub(crate) fn number_to_value(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Integer(i)
    } else {
        // u64 beyond i64::MAX or a genuine float
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}
