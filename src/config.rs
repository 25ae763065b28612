//! YAML configuration file support.
//!
//! One file configures every stage of a check. All sections are optional and
//! fall back to the defaults of the stage they configure.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "final exam bank"
//!
//! tokenizer:
//!   version: 1
//!   normalize_unicode: false
//!
//! filter:
//!   enabled: true
//!   min_length_ratio: 0.5
//!   min_token_overlap: 0.2
//!
//! scan:
//!   mode: cross          # omit to pick single/cross from the file count
//!   threshold: 0.75
//!   use_parallel: false
//!   limit: 200
//!   slice:
//!     max_comparisons: 500
//!     max_duration_ms: 16
//!
//! ingest:
//!   min_paragraph_chars: 20
//!   max_file_bytes: 52428800
//!   split: lines         # or blank_lines
//! ```

use std::fs;
use std::path::Path;

use canonical::TokenizeConfig;
use ingest::IngestConfig;
use matcher::{DEFAULT_THRESHOLD, ScanConfig, ScanMode, SliceBudget};
use serde::{Deserialize, Serialize};
use similarity::FilterConfig;
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for a duplicate check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct DupscanConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub tokenizer: TokenizeConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub scan: ScanYamlConfig,

    #[serde(default)]
    pub ingest: IngestConfig,
}

impl DupscanConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: DupscanConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.ingest
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("ingest: {e}")))?;
        if self.scan.limit == Some(0) {
            return Err(ConfigLoadError::Validation(
                "scan: limit must be greater than zero".into(),
            ));
        }
        // Tokenizer, filter, threshold and slice checks live on ScanConfig.
        self.scan_config(1)
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        Ok(())
    }

    /// Builds the scan configuration for a check over `file_count` files.
    ///
    /// Without an explicit mode, one file means single mode and several
    /// files mean cross mode.
    pub fn scan_config(&self, file_count: usize) -> ScanConfig {
        let mode = self.scan.mode.unwrap_or(if file_count == 1 {
            ScanMode::Single
        } else {
            ScanMode::Cross
        });
        ScanConfig::new(mode, self.scan.threshold)
            .with_filter(self.filter.clone())
            .with_tokenizer(self.tokenizer.clone())
            .with_slice(self.scan.slice)
            .with_parallel(self.scan.use_parallel)
    }
}

impl Default for DupscanConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: None,
            tokenizer: TokenizeConfig::default(),
            filter: FilterConfig::default(),
            scan: ScanYamlConfig::default(),
            ingest: IngestConfig::default(),
        }
    }
}

/// Scan section of the YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanYamlConfig {
    /// `single` or `cross`; chosen from the file count when absent.
    #[serde(default)]
    pub mode: Option<ScanMode>,

    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default)]
    pub slice: SliceBudget,

    #[serde(default)]
    pub use_parallel: bool,

    /// Report at most this many matches.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for ScanYamlConfig {
    fn default() -> Self {
        Self {
            mode: None,
            threshold: default_threshold(),
            slice: SliceBudget::default(),
            use_parallel: false,
            limit: None,
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}
