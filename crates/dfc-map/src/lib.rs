//! Schema reconciliation for heterogeneous datasets.
//!
//! [`SchemaMapper`] maps source column labels onto standard field names using
//! an exact alias lookup first and a Ratcliff/Obershelp similarity fallback.

#![deny(unsafe_code)]

pub mod error;
pub mod mapper;
pub mod similarity;

pub use error::MappingError;
pub use mapper::{ColumnMatch, LabelCollision, MatchKind, SchemaMapper, Standardized};
pub use similarity::similarity_ratio;
