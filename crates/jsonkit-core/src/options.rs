//! Encode/decode options and their normalisation.
//!
//! Every option accepts a short form (`true` / `false`) or a long form with
//! an `enable` flag plus option-specific settings, both from Rust and from
//! JSON:
//!
//! ```
//! use jsonkit_core::{DecodeOptions, EncodeOptions};
//!
//! let encode: EncodeOptions = serde_json::from_str(
//!     r#"{"extended": {"enable": true, "relaxed": false}, "minify": true}"#,
//! ).unwrap();
//! let config = encode.resolve().unwrap();
//! assert!(config.extended.enable && !config.extended.relaxed);
//! assert!(config.minify.enable && !config.compress);
//!
//! let decode = DecodeOptions::new().extended(true).decompress(false);
//! let config = decode.resolve().unwrap();
//! assert!(config.extended.relaxed && config.unminify.enable && !config.decompress);
//! ```
//!
//! [`EncodeOptions::resolve`] and [`DecodeOptions::resolve`] expand the
//! shorthand into fully populated configs before any stage runs.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Result;
use crate::legend::Legend;

// ============================================================================
// Shorthand option forms
// ============================================================================

/// `extended: bool | {enable, relaxed?}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExtendedOption {
    Flag(bool),
    Detailed {
        enable: bool,
        #[serde(default)]
        relaxed: Option<bool>,
    },
}

/// `minify` / `unminify`: `bool | {enable, keyMap?}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeyMapOption {
    Flag(bool),
    Detailed {
        enable: bool,
        #[serde(default, rename = "keyMap")]
        key_map: Option<IndexMap<String, String>>,
    },
}

/// `compress` / `decompress`: `bool | {enable}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ToggleOption {
    Flag(bool),
    Detailed { enable: bool },
}

impl From<bool> for ExtendedOption {
    fn from(enable: bool) -> Self {
        ExtendedOption::Flag(enable)
    }
}

impl From<bool> for KeyMapOption {
    fn from(enable: bool) -> Self {
        KeyMapOption::Flag(enable)
    }
}

impl From<bool> for ToggleOption {
    fn from(enable: bool) -> Self {
        ToggleOption::Flag(enable)
    }
}

impl ToggleOption {
    fn resolve(option: Option<&ToggleOption>, default: bool) -> bool {
        match option {
            None => default,
            Some(ToggleOption::Flag(enable)) | Some(ToggleOption::Detailed { enable }) => *enable,
        }
    }
}

// ============================================================================
// Resolved configs
// ============================================================================

/// Fully populated extended-codec settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedConfig {
    pub enable: bool,
    pub relaxed: bool,
}

impl Default for ExtendedConfig {
    fn default() -> Self {
        Self {
            enable: false,
            relaxed: true,
        }
    }
}

impl ExtendedConfig {
    fn resolve(option: Option<&ExtendedOption>) -> Self {
        let default = Self::default();
        match option {
            None => default,
            Some(ExtendedOption::Flag(enable)) => Self {
                enable: *enable,
                ..default
            },
            Some(ExtendedOption::Detailed { enable, relaxed }) => Self {
                enable: *enable,
                relaxed: relaxed.unwrap_or(default.relaxed),
            },
        }
    }
}

/// Fully populated minify/unminify settings. `key_map` is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapConfig {
    pub enable: bool,
    pub key_map: Option<Legend>,
}

impl KeyMapConfig {
    fn resolve(option: Option<&KeyMapOption>, default_enable: bool) -> Result<Self> {
        Ok(match option {
            None => Self {
                enable: default_enable,
                key_map: None,
            },
            Some(KeyMapOption::Flag(enable)) => Self {
                enable: *enable,
                key_map: None,
            },
            Some(KeyMapOption::Detailed { enable, key_map }) => Self {
                enable: *enable,
                key_map: key_map
                    .as_ref()
                    .map(|pairs| Legend::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))))
                    .transpose()?,
            },
        })
    }
}

/// Resolved encode settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeConfig {
    pub extended: ExtendedConfig,
    /// `key_map` is original→short.
    pub minify: KeyMapConfig,
    pub compress: bool,
    pub pretty: bool,
}

/// Resolved decode settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeConfig {
    pub extended: ExtendedConfig,
    /// `key_map` is short→original.
    pub unminify: KeyMapConfig,
    pub decompress: bool,
}

// ============================================================================
// Public option structs
// ============================================================================

/// Options for [`crate::encode`]. Everything is off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeOptions {
    pub extended: Option<ExtendedOption>,
    pub minify: Option<KeyMapOption>,
    pub compress: Option<ToggleOption>,
    pub pretty: Option<bool>,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extended(mut self, option: impl Into<ExtendedOption>) -> Self {
        self.extended = Some(option.into());
        self
    }

    pub fn minify(mut self, option: impl Into<KeyMapOption>) -> Self {
        self.minify = Some(option.into());
        self
    }

    pub fn compress(mut self, option: impl Into<ToggleOption>) -> Self {
        self.compress = Some(option.into());
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = Some(pretty);
        self
    }

    /// Expand shorthand and defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CodecError::KeyMap`] if a supplied key map is not a
    /// valid legend.
    pub fn resolve(&self) -> Result<EncodeConfig> {
        Ok(EncodeConfig {
            extended: ExtendedConfig::resolve(self.extended.as_ref()),
            minify: KeyMapConfig::resolve(self.minify.as_ref(), false)?,
            compress: ToggleOption::resolve(self.compress.as_ref(), false),
            pretty: self.pretty.unwrap_or(false),
        })
    }
}

/// Options for [`crate::decode`]. Unminify and decompress are on by default;
/// both switch themselves off for input that was not minified or compressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeOptions {
    pub extended: Option<ExtendedOption>,
    pub unminify: Option<KeyMapOption>,
    pub decompress: Option<ToggleOption>,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extended(mut self, option: impl Into<ExtendedOption>) -> Self {
        self.extended = Some(option.into());
        self
    }

    pub fn unminify(mut self, option: impl Into<KeyMapOption>) -> Self {
        self.unminify = Some(option.into());
        self
    }

    pub fn decompress(mut self, option: impl Into<ToggleOption>) -> Self {
        self.decompress = Some(option.into());
        self
    }

    /// Expand shorthand and defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CodecError::KeyMap`] if a supplied key map is not a
    /// valid legend.
    pub fn resolve(&self) -> Result<DecodeConfig> {
        Ok(DecodeConfig {
            extended: ExtendedConfig::resolve(self.extended.as_ref()),
            unminify: KeyMapConfig::resolve(self.unminify.as_ref(), true)?,
            decompress: ToggleOption::resolve(self.decompress.as_ref(), true),
        })
    }
}
