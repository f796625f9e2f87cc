//! Test selection and execution over column samples.

use polars::prelude::Column;
use tracing::{Span, debug};

use dfc_model::DEFAULT_ALPHA;

use crate::anderson::anderson_darling_normal;
use crate::chi_square::{ContingencyTable, chi_square_independence};
use crate::error::StatsError;
use crate::kolmogorov::ks_two_sample;
use crate::kruskal::kruskal_wallis;
use crate::result::{TestKind, TestResult};
use crate::sample::{categorical_values, coerce_numeric};

/// Smallest sample that gets an Anderson-Darling normality test.
pub const MIN_ANDERSON_SAMPLE: usize = 5;

/// Runs distribution comparisons at a fixed significance level.
#[derive(Debug, Clone)]
pub struct StatisticalTester {
    alpha: f64,
    span: Span,
}

impl Default for StatisticalTester {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl StatisticalTester {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            span: Span::none(),
        }
    }

    /// Attach the span that test events are recorded under.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Compare numeric samples.
    ///
    /// Columns that cannot be coerced to numbers are dropped before testing.
    /// Runs Kolmogorov-Smirnov when exactly two samples remain, then
    /// Kruskal-Wallis, then Anderson-Darling for every sample with at least
    /// [`MIN_ANDERSON_SAMPLE`] values.
    pub fn compare_numeric(&self, samples: &[Column]) -> Result<Vec<TestResult>, StatsError> {
        let cleaned: Vec<Vec<f64>> = samples
            .iter()
            .enumerate()
            .filter_map(|(idx, column)| match coerce_numeric(column) {
                Ok(values) => Some(values),
                Err(reason) => {
                    debug!(
                        parent: &self.span,
                        sample = idx + 1,
                        column = %column.name(),
                        %reason,
                        "dropping sample from numeric comparison"
                    );
                    None
                }
            })
            .collect();
        self.compare_numeric_values(&cleaned)
    }

    /// Compare samples that are already numeric.
    ///
    /// NaN values are removed and samples left empty are dropped.
    pub fn compare_numeric_values(
        &self,
        samples: &[Vec<f64>],
    ) -> Result<Vec<TestResult>, StatsError> {
        let samples: Vec<Vec<f64>> = samples
            .iter()
            .map(|values| {
                values
                    .iter()
                    .copied()
                    .filter(|v| !v.is_nan())
                    .collect::<Vec<f64>>()
            })
            .filter(|values| !values.is_empty())
            .collect();
        if samples.len() < 2 {
            return Err(StatsError::InsufficientData {
                usable: samples.len(),
            });
        }

        let mut results = Vec::new();

        if let [first, second] = samples.as_slice() {
            let ks = ks_two_sample(first, second);
            results.push(
                TestResult::from_p_value(
                    TestKind::KolmogorovSmirnov,
                    ks.statistic,
                    ks.p_value,
                    self.alpha,
                )
                .with_metadata("sample_sizes", vec![first.len(), second.len()]),
            );
        }

        let kw = kruskal_wallis(&samples);
        results.push(
            TestResult::from_p_value(TestKind::KruskalWallis, kw.statistic, kw.p_value, self.alpha)
                .with_metadata("degrees_of_freedom", kw.degrees_of_freedom),
        );

        for (idx, values) in samples.iter().enumerate() {
            if values.len() < MIN_ANDERSON_SAMPLE {
                continue;
            }
            let ad = anderson_darling_normal(values);
            let significant = ad.rejects_normality(self.alpha);
            results.push(
                TestResult::from_critical_value(
                    TestKind::AndersonDarling { sample: idx + 1 },
                    ad.statistic,
                    significant,
                    self.alpha,
                )
                .with_metadata("significance_levels", ad.significance_levels)
                .with_metadata("critical_values", ad.critical_values),
            );
        }

        debug!(
            parent: &self.span,
            samples = samples.len(),
            tests = results.len(),
            "numeric comparison complete"
        );
        Ok(results)
    }

    /// Compare categorical samples with a chi-square test of independence.
    ///
    /// Returns no results for fewer than two samples or when the contingency
    /// table has no usable counts.
    pub fn compare_categorical(&self, samples: &[Column]) -> Vec<TestResult> {
        let values: Vec<Vec<String>> = samples.iter().map(categorical_values).collect();
        self.compare_categorical_values(&values)
    }

    /// [`Self::compare_categorical`] over category labels.
    pub fn compare_categorical_values<S: AsRef<str>>(&self, samples: &[Vec<S>]) -> Vec<TestResult> {
        if samples.len() < 2 {
            return Vec::new();
        }
        let table = ContingencyTable::from_samples(samples);
        let Some(chi) = chi_square_independence(&table) else {
            debug!(
                parent: &self.span,
                rows = table.rows(),
                categories = table.columns(),
                "contingency table has no usable counts, skipping chi-square"
            );
            return Vec::new();
        };

        vec![
            TestResult::from_p_value(TestKind::ChiSquare, chi.statistic, chi.p_value, self.alpha)
                .with_metadata("degrees_of_freedom", chi.degrees_of_freedom),
        ]
    }
}
