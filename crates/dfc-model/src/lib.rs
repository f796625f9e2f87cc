#![deny(unsafe_code)]

pub mod config;
pub mod data_type;
pub mod dataset;
pub mod error;
pub mod mapping;

pub use config::{ComparisonConfig, DEFAULT_ALPHA, DEFAULT_FUZZY_THRESHOLD};
pub use data_type::DataType;
pub use dataset::Dataset;
pub use error::ConfigError;
pub use mapping::FieldMapping;
