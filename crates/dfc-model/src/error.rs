use thiserror::Error;

/// Invalid comparison configuration values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("significance level must be between 0 and 1 (exclusive), got {0}")]
    InvalidAlpha(f64),

    #[error("fuzzy match threshold must be between 0 and 1 (inclusive), got {0}")]
    InvalidThreshold(f64),
}
