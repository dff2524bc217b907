//! The minified envelope: `{"_jkv": <tree>, "_jkm": <legend>}`.
//!
//! Both key names are reserved. Plain data that happens to carry both of them
//! is indistinguishable from an envelope and will be unwrapped on decode.

use crate::legend::Legend;
use crate::types::{Map, Value};

/// Envelope key holding the rewritten value tree.
pub const VALUE_KEY: &str = "_jkv";

/// Envelope key holding the short→original legend.
pub const LEGEND_KEY: &str = "_jkm";

/// Build an envelope from a rewritten tree and its short→original legend.
pub fn wrap(tree: Value, legend: &Legend) -> Value {
    let mut map = Map::with_capacity(2);
    map.insert(VALUE_KEY.to_string(), tree);
    map.insert(LEGEND_KEY.to_string(), legend.to_value());
    Value::Object(map)
}

/// Whether `value` is an object carrying both envelope keys.
///
/// A null `_jkv` still counts: it is how a minified `null` root is wrapped.
pub fn is_envelope(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.contains_key(VALUE_KEY) && map.contains_key(LEGEND_KEY),
        _ => false,
    }
}

/// Split an envelope into its tree and embedded legend.
///
/// Returns the input unchanged in `Err` when it is not an envelope.
pub fn split(value: Value) -> Result<(Value, Legend), Value> {
    if !is_envelope(&value) {
        return Err(value);
    }
    match value {
        Value::Object(mut map) => {
            let legend = map
                .get(LEGEND_KEY)
                .map(Legend::from_embedded)
                .unwrap_or_default();
            let tree = map.swap_remove(VALUE_KEY).unwrap_or_default();
            Ok((tree, legend))
        }
        other => Err(other),
    }
}

/// Take the enveloped tree out of `value`, ignoring any embedded legend.
///
/// Unwraps a full envelope, or any object whose `_jkv` is non-null;
/// otherwise returns `value` unchanged.
pub fn unwrap_value(value: Value) -> Value {
    let unwraps = match &value {
        Value::Object(map) => {
            is_envelope(&value) || matches!(map.get(VALUE_KEY), Some(v) if !v.is_null())
        }
        _ => false,
    };
    match value {
        Value::Object(mut map) if unwraps => map.swap_remove(VALUE_KEY).unwrap_or_default(),
        other => other,
    }
}
