//! Reverse key minification.
//!
//! Unminification is self-disabling: without a caller-supplied legend, a tree
//! that is not a minified envelope is returned unchanged, so plain data can
//! flow through a decoder that has unminify enabled.
//!
//! # Example
//! ```
//! use jsonkit_core::{unminify, Value};
//! use serde_json::json;
//!
//! let wire = Value::from(json!({
//!     "_jkv": {"a": {"a": 1}},
//!     "_jkm": {"a": "settings"}
//! }));
//! let plain = unminify(wire, None);
//! assert_eq!(serde_json::Value::from(plain), json!({"settings": {"settings": 1}}));
//! ```

use crate::envelope;
use crate::legend::Legend;
use crate::types::{Map, Value};

/// Undo minification.
///
/// With `legend == None`, the embedded short→original legend of an envelope
/// is used, and non-envelopes pass through untouched. With a legend, an
/// envelope (if any) is unwrapped and its embedded legend ignored; keys not
/// in the legend pass through, so partial legends are fine.
pub fn unminify(tree: Value, legend: Option<&Legend>) -> Value {
    match legend {
        Some(legend) => restore_keys(envelope::unwrap_value(tree), legend),
        None => match envelope::split(tree) {
            Ok((inner, embedded)) => restore_keys(inner, &embedded),
            Err(plain) => {
                tracing::debug!("no minified envelope found, passing value through");
                plain
            }
        },
    }
}

fn restore_keys(value: Value, legend: &Legend) -> Value {
    match value {
        Value::Array(arr) => {
            Value::Array(arr.into_iter().map(|item| restore_keys(item, legend)).collect())
        }
        Value::Object(map) => Value::Object(restore_object(map, legend)),
        other => other,
    }
}

fn restore_object(map: Map, legend: &Legend) -> Map {
    let mut result = Map::with_capacity(map.len());
    for (key, child) in map {
        let child = restore_keys(child, legend);
        match legend.get(&key) {
            Some(original) if !original.is_empty() => {
                result.insert(original.to_string(), child);
            }
            // A restored key takes precedence over an untouched sibling of the same name.
            _ => {
                result.entry(key).or_insert(child);
            }
        }
    }
    result
}
