//! Comparison configuration.
//!
//! Loaded from TOML or JSON by the ingestion crate:
//!
//! ```toml
//! alpha = 0.05
//! fuzzy_threshold = 0.8
//!
//! [[fields]]
//! standard_name = "revenue"
//! aliases = ["sale_amount", "total_sale"]
//! data_type = "numeric"
//! ```

use serde::{Deserialize, Serialize};

use crate::{ConfigError, FieldMapping};

/// Default significance level for every test decision.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default minimum similarity for a fuzzy column match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_fuzzy_threshold() -> f64 {
    DEFAULT_FUZZY_THRESHOLD
}

/// Everything the caller supplies to a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    #[serde(default)]
    pub title: Option<String>,
    /// Field mappings in priority order.
    #[serde(default)]
    pub fields: Vec<FieldMapping>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            title: None,
            fields: Vec::new(),
        }
    }
}

impl ComparisonConfig {
    pub fn new(fields: Vec<FieldMapping>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Checks that alpha and the fuzzy threshold are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(ConfigError::InvalidThreshold(self.fuzzy_threshold));
        }
        Ok(())
    }
}
