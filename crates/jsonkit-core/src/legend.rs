//! Legends: the key maps that drive minification and its inverse.
//!
//! A legend maps *from* the keys found in the tree being rewritten *to* the
//! keys that replace them. Minification uses original→short legends;
//! unminification uses short→original legends. [`Legend::inverted`] flips
//! one into the other.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::{CodecError, Result};
use crate::types::{Map, Value};

/// An ordered, injective key map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    entries: IndexMap<String, String>,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a legend from caller-supplied pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::KeyMap`] if a target key is empty or two source
    /// keys share a target.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonkit_core::Legend;
    ///
    /// let legend = Legend::from_pairs([("long_key", "lk")]).unwrap();
    /// assert_eq!(legend.get("long_key"), Some("lk"));
    /// assert!(Legend::from_pairs([("a", "x"), ("b", "x")]).is_err());
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut legend = Self::new();
        let mut targets: HashSet<String> = HashSet::new();
        for (from, to) in pairs {
            let (from, to) = (from.into(), to.into());
            if to.is_empty() {
                return Err(CodecError::KeyMap(format!(
                    "key {from:?} maps to an empty key"
                )));
            }
            if !targets.insert(to.clone()) {
                return Err(CodecError::KeyMap(format!(
                    "more than one key maps to {to:?}"
                )));
            }
            legend.entries.insert(from, to);
        }
        Ok(legend)
    }

    /// Read a short→original legend embedded in a minified envelope.
    ///
    /// Embedded legends are trusted as far as they go: entries whose target
    /// is not a non-empty string are skipped, and a non-object yields an
    /// empty legend.
    pub fn from_embedded(value: &Value) -> Self {
        let mut legend = Self::new();
        if let Value::Object(map) = value {
            for (short, original) in map {
                match original {
                    Value::String(original) if !original.is_empty() => {
                        legend.entries.insert(short.clone(), original.clone());
                    }
                    _ => {}
                }
            }
        }
        legend
    }

    /// Lower the legend to an object of strings, as stored in an envelope.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(from, to)| (from.clone(), Value::String(to.clone())))
                .collect::<Map>(),
        )
    }

    /// Caller guarantees `to` is non-empty and not already a target.
    pub(crate) fn insert_unchecked(&mut self, from: String, to: String) {
        self.entries.insert(from, to);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The same legend, read in the opposite direction.
    pub fn inverted(&self) -> Legend {
        Legend {
            entries: self
                .entries
                .iter()
                .map(|(from, to)| (to.clone(), from.clone()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(from, to)| (from.as_str(), to.as_str()))
    }
}

impl<'a> IntoIterator for &'a Legend {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
