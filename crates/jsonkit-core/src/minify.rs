//! Key minification: replace long, frequent object keys with short identifiers.
//!
//! Deriving a legend runs a [`KeyCensus`] over the tree, then walks the
//! distinct keys in first-observed order, offering each one the next free
//! identifier from a [`KeyAllocator`]. A key only takes its identifier when
//! the substitution pays for its own legend entry:
//!
//! ```text
//! key_len * (count - 1) >= short_len * LEGEND_ENTRY_COST
//! ```
//!
//! Identifiers are never equal to any key that occurs in the tree, so a
//! rewritten object can never gain a clashing sibling.
//!
//! # Example
//! ```
//! use jsonkit_core::{minify, Value};
//! use serde_json::json;
//!
//! let tree = Value::from(json!([
//!     {"description": 1},
//!     {"description": 2},
//! ]));
//! let minified = minify(&tree);
//! assert_eq!(minified.legend.get("description"), Some("a"));
//! assert_eq!(serde_json::Value::from(&minified.tree), json!([{"a": 1}, {"a": 2}]));
//! ```

use std::collections::HashSet;

use crate::allocator::KeyAllocator;
use crate::census::KeyCensus;
use crate::envelope;
use crate::legend::Legend;
use crate::types::{Map, Value};

/// Assumed cost of one legend entry, in multiples of the short key's length.
pub const LEGEND_ENTRY_COST: usize = 2;

/// Result of [`minify`]: the rewritten tree and its original→short legend.
#[derive(Debug, Clone, PartialEq)]
pub struct Minified {
    pub tree: Value,
    pub legend: Legend,
}

impl Minified {
    /// Wrap the tree in a minified envelope carrying the short→original legend.
    pub fn into_envelope(self) -> Value {
        envelope::wrap(self.tree, &self.legend.inverted())
    }
}

/// Whether replacing `count` occurrences of `key` with `short` saves more
/// than the legend entry costs.
pub fn is_profitable(key: &str, count: usize, short: &str) -> bool {
    let key_len = key.chars().count();
    let short_len = short.chars().count();
    key_len * count.saturating_sub(1) >= short_len * LEGEND_ENTRY_COST
}

/// Derive an original→short legend for `value`.
pub fn derive_legend(value: &Value) -> Legend {
    let census = KeyCensus::of(value);
    let mut allocator = KeyAllocator::new();
    let mut assigned: HashSet<String> = HashSet::new();
    let mut legend = Legend::new();

    for (key, count) in census.iter() {
        let (index, short) =
            allocator.probe(|candidate| census.contains(candidate) || assigned.contains(candidate));
        if !is_profitable(key, count, &short) {
            continue;
        }
        allocator.commit(index);
        assigned.insert(short.clone());
        legend.insert_unchecked(key.to_string(), short);
    }

    tracing::debug!(
        distinct_keys = census.len(),
        substituted = legend.len(),
        "derived minification legend"
    );
    legend
}

/// Minify `value` with a derived legend. The input is left untouched.
pub fn minify(value: &Value) -> Minified {
    let legend = derive_legend(value);
    let tree = minify_with(value, &legend);
    Minified { tree, legend }
}

/// Rewrite `value` using a caller-supplied original→short legend verbatim.
///
/// Keys absent from the legend are copied unchanged. If a short key collides
/// with an untouched sibling, the rewritten entry wins whichever comes first;
/// the merged entry keeps the position of the earlier one.
pub fn minify_with(value: &Value, legend: &Legend) -> Value {
    rename_keys(value, legend)
}

/// Build a copy of `value` with every object key found in `legend` renamed.
fn rename_keys(value: &Value, legend: &Legend) -> Value {
    match value {
        Value::Array(arr) => Value::Array(arr.iter().map(|item| rename_keys(item, legend)).collect()),
        Value::Object(map) => Value::Object(rename_object(map, legend)),
        other => other.clone(),
    }
}

fn rename_object(map: &Map, legend: &Legend) -> Map {
    let mut result = Map::with_capacity(map.len());
    for (key, child) in map {
        let child = rename_keys(child, legend);
        match legend.get(key) {
            Some(renamed) => {
                result.insert(renamed.to_string(), child);
            }
            None => {
                result.entry(key.clone()).or_insert(child);
            }
        }
    }
    result
}
