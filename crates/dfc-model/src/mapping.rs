//! Field mapping definitions.
//!
//! A [`FieldMapping`] ties one standard field name to the alternate column
//! spellings found across source datasets.

use serde::{Deserialize, Serialize};

use crate::DataType;

/// Mapping between a standard field name and its aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Canonical name columns are renamed to.
    pub standard_name: String,
    /// Alternate spellings, in priority order.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Declared type. Informational only; the type is inferred at runtime.
    #[serde(default)]
    pub data_type: DataType,
    /// Optional human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

impl FieldMapping {
    pub fn new<I, S>(standard_name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            standard_name: standard_name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
            data_type: DataType::Unknown,
            description: None,
        }
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
