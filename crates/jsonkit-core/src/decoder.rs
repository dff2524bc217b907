//! Decode pipeline: text → (decompress) → JSON → (extended | plain) value → (unminify).
//!
//! Decompression and unminification switch themselves off when the input was
//! not compressed or not minified, so the defaults (both enabled) decode
//! plain JSON too. Extended decoding does not: if the caller asks for it and
//! a wrapper is malformed, the error propagates.
//!
//! # Example
//! ```
//! use jsonkit_core::{decode, DecodeOptions, Value};
//! use serde_json::json;
//!
//! let text = r#"{"_jkv":{"lk":"A Large Object"},"_jkm":{}}"#;
//! let options = DecodeOptions::new().unminify(jsonkit_core::KeyMapOption::Detailed {
//!     enable: true,
//!     key_map: Some([("lk".to_string(), "long_key".to_string())].into_iter().collect()),
//! });
//! let value = decode(text, &options).unwrap();
//! assert_eq!(value, Value::from(json!({"long_key": "A Large Object"})));
//! ```

use std::borrow::Cow;
use std::fmt::Display;

use serde::de::DeserializeOwned;

use crate::compress::decompress_text;
use crate::error::{CodecError, Result};
use crate::extended::ExtendedCodec;
use crate::options::{DecodeConfig, DecodeOptions};
use crate::types::Value;
use crate::unminify::unminify;

/// Reason reported when a type guard rejects a value without explaining why.
pub const SILENT_GUARD_REASON: &str =
    "Please return a custom error from the type guard to track the problems";

/// Decode `text` according to `options`.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if the (decompressed) text is not JSON,
/// [`CodecError::Extended`] if extended decoding is enabled and a wrapper is
/// malformed, and [`CodecError::KeyMap`] if a supplied key map is invalid.
pub fn decode(text: &str, options: &DecodeOptions) -> Result<Value> {
    let config = options.resolve()?;
    decode_with(text, &config)
}

/// Decode with an already resolved config.
pub fn decode_with(text: &str, config: &DecodeConfig) -> Result<Value> {
    let text = if config.decompress {
        Cow::Owned(decompress_text(text))
    } else {
        Cow::Borrowed(text)
    };

    let json: serde_json::Value = serde_json::from_str(&text)?;
    let value = if config.extended.enable {
        ExtendedCodec::new(config.extended.relaxed).from_json(json)?
    } else {
        Value::from(json)
    };

    if config.unminify.enable {
        Ok(unminify(value, config.unminify.key_map.as_ref()))
    } else {
        Ok(value)
    }
}

/// Decode, then check the result with `guard`.
///
/// The guard should return `Err` with a diagnostic when it rejects a value.
/// Returning `Ok(false)` still rejects it, with [`SILENT_GUARD_REASON`] as
/// the reason.
///
/// # Examples
///
/// ```
/// use jsonkit_core::{decode_guarded, DecodeOptions, Value};
///
/// let has_name = |value: &Value| match value.get("name") {
///     Some(Value::String(_)) => Ok(true),
///     _ => Err("`name` must be a string"),
/// };
/// assert!(decode_guarded(r#"{"name":"Ada"}"#, &DecodeOptions::new(), has_name).is_ok());
/// let err = decode_guarded(r#"{"name":1}"#, &DecodeOptions::new(), has_name).unwrap_err();
/// assert!(err.to_string().contains("`name` must be a string"));
/// ```
pub fn decode_guarded<G, E>(text: &str, options: &DecodeOptions, guard: G) -> Result<Value>
where
    G: FnOnce(&Value) -> std::result::Result<bool, E>,
    E: Display,
{
    let value = decode(text, options)?;
    match guard(&value) {
        Ok(true) => Ok(value),
        Ok(false) => Err(CodecError::Validation {
            reason: Some(SILENT_GUARD_REASON.to_string()),
        }),
        Err(err) => {
            let reason = err.to_string();
            Err(CodecError::Validation {
                reason: (!reason.is_empty()).then_some(reason),
            })
        }
    }
}

/// Decode, then deserialize the plain JSON form of the result into `T`.
///
/// Dates reach `T` as ISO-8601 strings, which chrono's serde support accepts.
pub fn decode_into<T: DeserializeOwned>(text: &str, options: &DecodeOptions) -> Result<T> {
    let value = decode(text, options)?;
    serde_json::from_value(serde_json::Value::from(value)).map_err(|err| CodecError::Validation {
        reason: Some(err.to_string()),
    })
}
