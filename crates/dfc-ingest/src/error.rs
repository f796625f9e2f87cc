//! Error types for ingestion operations.

use std::path::PathBuf;

use dfc_model::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not one of the supported formats.
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Data Errors ===
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    // === Configuration Errors ===
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("invalid config {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/sales.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /data/sales.csv");

        let err = IngestError::InvalidConfig {
            path: PathBuf::from("fields.toml"),
            source: ConfigError::InvalidAlpha(2.0),
        };
        assert!(err.to_string().starts_with("invalid config fields.toml"));
    }
}
