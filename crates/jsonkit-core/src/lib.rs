//! # jsonkit-core
//!
//! A JSON codec pipeline with three independent, composable transforms:
//!
//! - **Extended encoding**: dates, binary and exact numeric types survive the
//!   trip through text as MongoDB Extended JSON v2 wrappers.
//! - **Key minification**: long, frequently repeated object keys are replaced
//!   by short deterministic identifiers, with a legend embedded next to the
//!   rewritten tree so the decoder can restore them.
//! - **Compression**: the final text is LZ4-compressed and base64 encoded.
//!
//! Decoding undoes whichever transforms were applied. Decompression and
//! unminification detect input that was never compressed or minified and
//! pass it through.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonkit_core::{decode, encode, DecodeOptions, EncodeOptions, Value};
//! use serde_json::json;
//!
//! let value = Value::from(json!({
//!     "measurements": [
//!         {"temperature": 20.5, "humidity": 40},
//!         {"temperature": 21.0, "humidity": 42}
//!     ]
//! }));
//!
//! let options = EncodeOptions::new().extended(true).minify(true).compress(true);
//! let text = encode(&value, &options).unwrap();
//!
//! let back = decode(&text, &DecodeOptions::new().extended(true)).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the `Value` tree
//! - [`allocator`]: short identifier enumeration
//! - [`census`]: per-key occurrence counts
//! - [`legend`]: key maps and their inversion
//! - [`minify`](mod@minify) / [`unminify`](mod@unminify): key rewriting in both directions
//! - [`envelope`]: the `{"_jkv", "_jkm"}` wrapper
//! - [`extended`]: extended JSON codec
//! - [`compress`]: text compression
//! - [`options`]: option shorthand and resolution
//! - [`encoder`] / [`decoder`]: the pipelines
//! - [`error`]: error types

pub mod allocator;
pub mod census;
pub mod compress;
pub mod decoder;
pub mod encoder;
pub mod envelope;
pub mod error;
pub mod extended;
pub mod legend;
pub mod minify;
pub mod options;
pub mod types;
pub mod unminify;

pub use allocator::{Identifiers, KeyAllocator};
pub use census::KeyCensus;
pub use compress::{compress_text, decompress_text};
pub use decoder::{decode, decode_guarded, decode_into, decode_with};
pub use encoder::{encode, encode_with, from_extended, to_extended};
pub use error::{CodecError, Result};
pub use extended::ExtendedCodec;
pub use legend::Legend;
pub use minify::{minify, minify_with, Minified};
pub use options::{
    DecodeConfig, DecodeOptions, EncodeConfig, EncodeOptions, ExtendedOption, KeyMapOption,
    ToggleOption,
};
pub use types::{Binary, Map, Value, ValueKind};
pub use unminify::unminify;
