use dfc_map::MappingError;
use dfc_model::ConfigError;
use dfc_stats::StatsError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("no datasets provided for comparison")]
    NoDatasets,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid field mappings: {0}")]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
