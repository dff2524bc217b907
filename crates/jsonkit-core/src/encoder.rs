//! Encode pipeline: value → (minify) → (extended | plain) JSON → text → (compress).
//!
//! Minification runs on the typed value tree, where dates and binary are
//! opaque leaves, and the extended codec lowers the result afterwards. The
//! extended `$`-wrappers are therefore never counted or renamed as data keys,
//! and the decode pipeline (parse → extended decode → unminify) is the exact
//! inverse.
//!
//! # Example
//! ```
//! use jsonkit_core::{decode, encode, DecodeOptions, EncodeOptions, Value};
//! use serde_json::json;
//!
//! let value = Value::from(json!([{"temperature": 20}, {"temperature": 21}]));
//! let text = encode(&value, &EncodeOptions::new().minify(true)).unwrap();
//! assert_eq!(text, r#"{"_jkv":[{"a":20},{"a":21}],"_jkm":{"a":"temperature"}}"#);
//! assert_eq!(decode(&text, &DecodeOptions::new()).unwrap(), value);
//! ```

use std::borrow::Cow;

use crate::compress::compress_text;
use crate::decoder::decode_with;
use crate::error::Result;
use crate::extended::ExtendedCodec;
use crate::minify::{minify, minify_with, Minified};
use crate::options::{DecodeConfig, EncodeConfig, EncodeOptions, ExtendedConfig, KeyMapConfig};
use crate::types::Value;

/// Encode `value` to text according to `options`.
///
/// # Errors
///
/// Returns an error if a supplied key map is invalid, or if JSON
/// serialization fails.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String> {
    let config = options.resolve()?;
    encode_with(value, &config)
}

/// Encode with an already resolved config.
pub fn encode_with(value: &Value, config: &EncodeConfig) -> Result<String> {
    let tree = if config.minify.enable {
        let minified = match &config.minify.key_map {
            Some(legend) => Minified {
                tree: minify_with(value, legend),
                legend: legend.clone(),
            },
            None => minify(value),
        };
        tracing::trace!(substituted = minified.legend.len(), "minified value tree");
        Cow::Owned(minified.into_envelope())
    } else {
        Cow::Borrowed(value)
    };

    let json = if config.extended.enable {
        ExtendedCodec::new(config.extended.relaxed).to_json(&tree)
    } else {
        serde_json::Value::from(tree.as_ref())
    };

    let text = if config.pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };

    if config.compress {
        let compressed = compress_text(&text);
        tracing::trace!(plain = text.len(), compressed = compressed.len(), "compressed text");
        Ok(compressed)
    } else {
        Ok(text)
    }
}

// ============================================================================
// Extended <-> plain conversions
// ============================================================================

/// Replace typed values with their relaxed extended-JSON wrapper objects.
///
/// The result contains only plain JSON shapes; a date becomes
/// `{"$date": "..."}`.
pub fn to_extended(value: &Value) -> Result<Value> {
    let text = encode_with(value, &single_stage_encode(true))?;
    decode_with(&text, &single_stage_decode(false))
}

/// Turn relaxed extended-JSON wrapper objects back into typed values.
pub fn from_extended(value: &Value) -> Result<Value> {
    let text = encode_with(value, &single_stage_encode(false))?;
    decode_with(&text, &single_stage_decode(true))
}

fn single_stage_encode(extended: bool) -> EncodeConfig {
    EncodeConfig {
        extended: ExtendedConfig {
            enable: extended,
            relaxed: true,
        },
        minify: KeyMapConfig {
            enable: false,
            key_map: None,
        },
        compress: false,
        pretty: false,
    }
}

fn single_stage_decode(extended: bool) -> DecodeConfig {
    DecodeConfig {
        extended: ExtendedConfig {
            enable: extended,
            relaxed: true,
        },
        unminify: KeyMapConfig {
            enable: false,
            key_map: None,
        },
        decompress: false,
    }
}
