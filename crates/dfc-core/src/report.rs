//! Comparison output.

use std::collections::BTreeMap;

use dfc_map::{ColumnMatch, LabelCollision};
use dfc_model::{DataType, Dataset};
use dfc_stats::TestResult;
use serde::Serialize;

use crate::summary::SummaryCard;

/// How one input dataset was relabeled.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStandardization {
    pub dataset: String,
    pub rows: usize,
    pub columns: usize,
    pub matches: Vec<ColumnMatch>,
    pub collisions: Vec<LabelCollision>,
}

/// Tests run for one common field, in test order.
#[derive(Debug, Clone, Serialize)]
pub struct FieldComparison {
    pub field: String,
    pub data_type: DataType,
    pub tests: Vec<TestResult>,
}

impl FieldComparison {
    /// True when any test with a p-value falls below its alpha.
    pub fn has_significant_difference(&self) -> bool {
        self.tests.iter().any(TestResult::is_significant_difference)
    }
}

/// Why a comparable field produced no tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The named dataset has no non-null values for the field.
    EmptyColumn { dataset: String },
    /// Fewer than two samples survived numeric coercion.
    InsufficientData { usable: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedField {
    pub field: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Everything a comparison run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub title: String,
    pub alpha: f64,
    pub datasets: Vec<DatasetStandardization>,
    /// Sorted names present in every standardized dataset.
    pub common_fields: Vec<String>,
    /// Inferred type of every common field.
    pub field_types: BTreeMap<String, DataType>,
    pub fields: Vec<FieldComparison>,
    pub skipped_fields: Vec<SkippedField>,
    pub summary_cards: Vec<SummaryCard>,
    pub insights: Vec<String>,
    /// Relabeled datasets, in input order.
    #[serde(skip)]
    pub standardized: Vec<Dataset>,
}

impl ComparisonReport {
    pub fn field(&self, name: &str) -> Option<&FieldComparison> {
        self.fields.iter().find(|f| f.field == name)
    }

    /// Every test result with its field name, in report order.
    pub fn test_results(&self) -> impl Iterator<Item = (&str, &TestResult)> {
        self.fields
            .iter()
            .flat_map(|f| f.tests.iter().map(move |t| (f.field.as_str(), t)))
    }
}
