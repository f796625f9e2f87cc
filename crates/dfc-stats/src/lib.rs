//! Statistical comparison of samples drawn from several datasets.
//!
//! Numeric fields get a two-sample Kolmogorov-Smirnov test (exactly two
//! samples), a Kruskal-Wallis test and a per-sample Anderson-Darling
//! normality test. Categorical fields get a chi-square test of independence.
//! Every result carries a methodological description and a generated
//! interpretation.

#![deny(unsafe_code)]

pub mod anderson;
pub mod chi_square;
pub mod error;
pub mod interpret;
pub mod kolmogorov;
pub mod kruskal;
pub mod result;
pub mod sample;
pub mod special;
pub mod tester;

pub use anderson::{
    AndersonDarling, CRITICAL_VALUE_BASE, SIGNIFICANCE_LEVELS, anderson_darling_normal,
};
pub use chi_square::{ChiSquare, ContingencyTable, chi_square_independence};
pub use error::StatsError;
pub use kolmogorov::{KolmogorovSmirnov, ks_two_sample};
pub use kruskal::{KruskalWallis, kruskal_wallis};
pub use result::{MetadataValue, NO_P_VALUE, TestKind, TestResult};
pub use sample::{CoercionFailure, categorical_values, coerce_numeric, is_numeric_storage};
pub use tester::{MIN_ANDERSON_SAMPLE, StatisticalTester};
