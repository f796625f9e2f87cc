//! Comparison configuration files.

use std::path::Path;

use dfc_model::ComparisonConfig;

use crate::error::{IngestError, Result};

/// Configuration file syntax, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Reads, parses and validates a configuration file.
pub fn load_config(path: &Path) -> Result<ComparisonConfig> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = parse_config(&content, format).map_err(|message| IngestError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })?;
    config.validate().map_err(|e| IngestError::InvalidConfig {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(config)
}

/// Parses configuration text without validating it.
pub fn parse_config(content: &str, format: ConfigFormat) -> std::result::Result<ComparisonConfig, String> {
    match format {
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}
