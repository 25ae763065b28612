//! Configuration types for the tokenizer.
//!
//! This module defines [`TokenizeConfig`], which controls how paragraph text
//! is prepared before it is split into comparison units.
//!
//! # Versioning
//!
//! The `version` field tracks tokenization behavior. Any change that can
//! alter the token stream for a given input must bump it, so that results
//! from two scans are only compared when they were produced by the same
//! tokenizer.
//!
//! # Examples
//!
//! ```rust
//! use canonical::TokenizeConfig;
//!
//! let config = TokenizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(!config.normalize_unicode);
//! ```
//!
//! ## Folding full-width Latin letters
//!
//! ```rust
//! use canonical::{tokenize_with_config, TokenizeConfig};
//!
//! let config = TokenizeConfig::new().with_unicode_normalization(true);
//! let tokens = tokenize_with_config("ＡＢＣ test", &config);
//! assert_eq!(tokens[0].text, "abc");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the tokenizer.
///
/// Cheap to clone and serializable so it can live inside higher-level scan
/// configurations and YAML files:
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenizeConfig {
    /// Version of the tokenization behavior. Must be >= 1.
    pub version: u32,

    /// If true, apply Unicode NFKC normalization before lower-casing.
    ///
    /// NFKC folds compatibility characters, most notably full-width Latin
    /// letters (`Ａ` U+FF21) onto their ASCII forms, so they take part in
    /// Latin word runs instead of being discarded.
    ///
    /// # Default
    ///
    /// `false`. The plain contract (lower-case, then extract CJK ideographs
    /// and ASCII letter runs) is what scans use unless a caller opts in.
    pub normalize_unicode: bool,
}

impl TokenizeConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable NFKC normalization.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "tokenizer version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TokenizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: false,
        }
    }
}
