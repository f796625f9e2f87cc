use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic classification of a field, used to pick the comparison strategy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Integer, float or boolean storage.
    Numeric,
    /// Low-cardinality values (fewer than 5% distinct).
    Categorical,
    /// Date, datetime, time or duration storage.
    Datetime,
    /// Free-form, high-cardinality values.
    Text,
    /// Nothing to classify (e.g. an all-null column).
    #[default]
    Unknown,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Numeric => "numeric",
            DataType::Categorical => "categorical",
            DataType::Datetime => "datetime",
            DataType::Text => "text",
            DataType::Unknown => "unknown",
        }
    }

    /// Returns true for the types that have a statistical comparison.
    pub fn is_comparable(&self) -> bool {
        matches!(self, DataType::Numeric | DataType::Categorical)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(DataType::Numeric),
            "categorical" => Ok(DataType::Categorical),
            "datetime" => Ok(DataType::Datetime),
            "text" => Ok(DataType::Text),
            "unknown" => Ok(DataType::Unknown),
            other => Err(format!("unknown data type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Numeric".parse::<DataType>().unwrap(), DataType::Numeric);
        assert_eq!(" TEXT ".parse::<DataType>().unwrap(), DataType::Text);
        assert!("float".parse::<DataType>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&DataType::Categorical).unwrap();
        assert_eq!(json, "\"categorical\"");
    }

    #[test]
    fn only_numeric_and_categorical_are_comparable() {
        assert!(DataType::Numeric.is_comparable());
        assert!(DataType::Categorical.is_comparable());
        assert!(!DataType::Datetime.is_comparable());
        assert!(!DataType::Text.is_comparable());
        assert!(!DataType::Unknown.is_comparable());
    }
}
