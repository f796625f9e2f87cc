//! Error types for mapping operations.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors from building a mapper or standardizing a frame.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("field mapping #{position} has an empty standard name")]
    EmptyStandardName { position: usize },

    #[error("duplicate standard name: {name}")]
    DuplicateStandardName { name: String },

    #[error("field '{standard}' declares an empty alias")]
    EmptyAlias { standard: String },

    #[error("alias '{alias}' is registered for both '{first}' and '{second}'")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("alias '{alias}' of '{owner}' shadows the standard name '{standard}'")]
    AliasShadowsStandard {
        alias: String,
        owner: String,
        standard: String,
    },

    #[error("failed to rebuild frame: {0}")]
    Frame(#[from] PolarsError),
}
