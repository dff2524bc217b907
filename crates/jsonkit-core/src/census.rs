//! Key census: how often each object key occurs anywhere in a value tree.

use indexmap::IndexMap;

use crate::types::Value;

/// Occurrence count per distinct object key, in first-observed order.
///
/// Keys that never occur are absent; every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCensus {
    counts: IndexMap<String, usize>,
}

impl KeyCensus {
    /// Count every key of every object in `value`, at any depth, including
    /// objects nested inside arrays. Opaque leaves contribute nothing.
    pub fn of(value: &Value) -> Self {
        let mut census = Self::default();
        census.visit(value);
        census
    }

    fn visit(&mut self, value: &Value) {
        match value {
            Value::Array(arr) => {
                for item in arr {
                    self.visit(item);
                }
            }
            Value::Object(map) => {
                for (key, child) in map {
                    *self.counts.entry(key.clone()).or_insert(0) += 1;
                    self.visit(child);
                }
            }
            Value::Null
            | Value::Bool(_)
            | Value::Integer(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Date(_)
            | Value::Binary(_) => {}
        }
    }

    pub fn count(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(key, count)` pairs in the order the keys were first seen.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(key, count)| (key.as_str(), *count))
    }
}
