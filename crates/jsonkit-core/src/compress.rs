//! Text compression: UTF-8 → LZ4 block → URL-safe base64.
//!
//! The compressed bytes carry a 4-byte little-endian prefix with the
//! uncompressed length (the `lz4_flex` "size prepended" layout). Base64
//! output is unpadded; input is accepted with or without padding.
//!
//! [`decompress_text`] never fails. Anything that does not decode all the way
//! back to UTF-8 text is assumed not to be compressed and is returned as is.
//!
//! # Example
//! ```
//! use jsonkit_core::{compress_text, decompress_text};
//!
//! let text = r#"{"name":"Alice","name2":"Alice","name3":"Alice"}"#;
//! let packed = compress_text(text);
//! assert_eq!(decompress_text(&packed), text);
//! assert_eq!(decompress_text(text), text);
//! ```

use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

const BASE64: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Upper bound on the LZ4 block expansion ratio.
const MAX_EXPANSION: usize = 255;

/// Compress text and encode the result as URL-safe base64.
pub fn compress_text(text: &str) -> String {
    let compressed = lz4_flex::block::compress_prepend_size(text.as_bytes());
    BASE64.encode(compressed)
}

/// Reverse [`compress_text`], or return `text` unchanged if it is not
/// compressed text.
pub fn decompress_text(text: &str) -> String {
    match try_decompress(text) {
        Some(plain) => plain,
        None => {
            tracing::debug!(len = text.len(), "input is not compressed, passing text through");
            text.to_string()
        }
    }
}

/// Strict variant of [`decompress_text`]: `None` when any step fails.
pub fn try_decompress(text: &str) -> Option<String> {
    let bytes = BASE64.decode(text.trim()).ok()?;
    let (prefix, payload) = bytes.split_first_chunk::<4>()?;
    let size = u32::from_le_bytes(*prefix) as usize;
    // Reject declared sizes the payload could never expand to before allocating.
    if size > payload.len().saturating_mul(MAX_EXPANSION).saturating_add(16) {
        return None;
    }
    let decompressed = lz4_flex::block::decompress(payload, size).ok()?;
    String::from_utf8(decompressed).ok()
}
