//! File loading for comparison runs.
//!
//! Reads CSV, TSV, Parquet and JSON files into [`Dataset`](dfc_model::Dataset)s and
//! comparison configuration from TOML or JSON.

#![deny(unsafe_code)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod loader;

pub use config::{ConfigFormat, load_config, parse_config};
pub use discovery::list_data_files;
pub use error::{IngestError, Result};
pub use loader::{DataFormat, LoadFailure, LoadOutcome, load_dataset, load_datasets};
