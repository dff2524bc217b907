//! Error types for jsonkit encoding and decoding.

use thiserror::Error;

/// Errors that can occur while encoding or decoding.
///
/// Decompression failures and missing minification envelopes are not errors:
/// those stages disable themselves and pass the input through.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The text was not valid JSON, or a value could not be serialized.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// An extended JSON type wrapper was malformed.
    /// `path` is a JSON-pointer-like location (`/` for the root).
    #[error("extended JSON error at {path}: {message}")]
    Extended { path: String, message: String },

    /// A caller-supplied key map cannot be used as a legend.
    #[error("invalid key map: {0}")]
    KeyMap(String),

    /// The decoded value was rejected by a type guard or typed deserialization.
    #[error("{}", validation_message(.reason))]
    Validation { reason: Option<String> },
}

fn validation_message(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!("Parsed object failed to pass type guard\n  Reason: {reason}"),
        None => "Parsed object failed to pass type guard".to_string(),
    }
}

/// Convenience alias used throughout jsonkit-core.
pub type Result<T> = std::result::Result<T, CodecError>;
