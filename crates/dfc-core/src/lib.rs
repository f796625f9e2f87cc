//! Comparison engine: standardizes datasets, infers field types and runs
//! the statistical tests for every field the datasets share.

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod infer;
pub mod report;
pub mod summary;

pub use engine::{ComparisonEngine, common_fields};
pub use error::ComparisonError;
pub use infer::{CATEGORICAL_UNIQUE_RATIO, infer_data_type};
pub use report::{
    ComparisonReport, DatasetStandardization, FieldComparison, SkipReason, SkippedField,
};
pub use summary::{SummaryCard, key_insights, summary_cards};
