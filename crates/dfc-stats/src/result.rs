//! Test identities and structured results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::interpret;

/// p-value reported by tests that only compare against critical values.
pub const NO_P_VALUE: f64 = -1.0;

/// The tests this crate runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum TestKind {
    KolmogorovSmirnov,
    KruskalWallis,
    /// Normality test of one sample; `sample` is 1-based.
    AndersonDarling { sample: usize },
    ChiSquare,
}

impl TestKind {
    /// Display name, e.g. `"Anderson-Darling Test (Sample 2)"`.
    pub fn name(&self) -> String {
        match self {
            Self::AndersonDarling { sample } => format!("{} (Sample {sample})", self.family()),
            _ => self.family().to_string(),
        }
    }

    /// Name shared by every instance of the test.
    pub fn family(&self) -> &'static str {
        match self {
            Self::KolmogorovSmirnov => "Kolmogorov-Smirnov Test",
            Self::KruskalWallis => "Kruskal-Wallis Test",
            Self::AndersonDarling { .. } => "Anderson-Darling Test",
            Self::ChiSquare => "Chi-square Test",
        }
    }

    /// What the test does and when it applies.
    pub fn description(&self) -> &'static str {
        match self {
            Self::KolmogorovSmirnov => {
                "A non-parametric test that compares the cumulative distributions of two samples. \
                 It measures the maximum distance between the empirical distribution functions and \
                 tests whether two samples come from the same distribution. Sensitive to differences \
                 in both location and shape of distributions. Works well for continuous data."
            }
            Self::KruskalWallis => {
                "A non-parametric alternative to one-way ANOVA that tests whether samples originate \
                 from the same distribution. It uses ranks rather than actual values, making it robust \
                 to outliers and non-normal distributions. Tests the null hypothesis that all groups have \
                 identical median values. Suitable for comparing 2 or more independent samples."
            }
            Self::AndersonDarling { .. } => {
                "A goodness-of-fit test that determines if a sample comes from a specified distribution \
                 (usually normal). More sensitive than Kolmogorov-Smirnov to deviations in the tails of \
                 distributions. Provides critical values at multiple significance levels rather than a single \
                 p-value. Particularly useful for testing normality assumptions before applying parametric tests."
            }
            Self::ChiSquare => {
                "A statistical test for categorical data that determines if there is a significant \
                 association between two or more categorical variables. It compares observed frequencies \
                 in a contingency table with expected frequencies under the assumption of independence. \
                 Requires sufficient sample size (expected frequencies > 5) for validity. Tests whether \
                 the distribution of one variable differs across levels of another variable."
            }
        }
    }

    pub fn null_hypothesis(&self) -> &'static str {
        match self {
            Self::KolmogorovSmirnov => "distributions are identical",
            Self::KruskalWallis => "all distributions are identical",
            Self::AndersonDarling { .. } => "sample is normally distributed",
            Self::ChiSquare => "distributions are independent",
        }
    }

    /// False for tests judged against critical values only.
    pub fn reports_p_value(&self) -> bool {
        !matches!(self, Self::AndersonDarling { .. })
    }

    /// Plain-language reading of the outcome, where the test has one.
    pub fn practical_guidance(&self, p_value: f64, significant: bool) -> Option<&'static str> {
        match self {
            Self::KolmogorovSmirnov => None,
            Self::KruskalWallis => Some(match (significant, p_value) {
                (true, p) if p < 0.001 => {
                    "The datasets have very different central tendencies and spreads. The median values and/or \
                     the distribution shapes differ substantially between groups. This indicates the datasets represent \
                     distinct populations or measurement conditions. You should not combine these datasets without \
                     careful consideration of the differences."
                }
                (true, p) if p < 0.01 => {
                    "The datasets show significantly different median values or ranks. At least one dataset differs \
                     meaningfully from the others in its central location or spread. Consider using separate analyses \
                     for each dataset or accounting for these differences in your modeling approach."
                }
                (true, _) => {
                    "The datasets have different median values or rank distributions. While there is overlap, \
                     the differences are statistically meaningful. Investigate whether these differences align with \
                     expected variations based on data collection context or time periods."
                }
                (false, _) => {
                    "The datasets have similar median values and rank distributions. They appear to represent the same \
                     underlying population or process, making them suitable for combined analysis. The non-parametric \
                     nature of this test confirms similarity even if the data is not normally distributed."
                }
            }),
            Self::AndersonDarling { .. } => Some(if significant {
                "At least one dataset significantly deviates from the reference distribution (typically normal). \
                 This suggests different underlying data generation processes or the presence of outliers, skewness, \
                 or other distribution anomalies. Consider data transformation, outlier treatment, or using \
                 non-parametric methods for analysis."
            } else {
                "The datasets follow similar distribution patterns consistent with the reference distribution. \
                 This supports using parametric statistical methods and suggests the data generation processes \
                 are comparable across datasets."
            }),
            Self::ChiSquare => Some(match (significant, p_value) {
                (true, p) if p < 0.001 => {
                    "The categorical distributions are highly different between datasets. The frequency patterns \
                     of categories vary substantially, indicating different population characteristics or strong \
                     selection biases. This suggests the datasets represent fundamentally different groups or conditions. \
                     Do not combine without weighting or stratification."
                }
                (true, p) if p < 0.01 => {
                    "The category frequencies differ significantly between datasets. Some categories are over or \
                     under-represented in certain datasets compared to others. This could indicate sampling biases, \
                     temporal changes, or genuine population differences that should be addressed in analysis."
                }
                (true, _) => {
                    "The categorical distributions show meaningful differences. While some categories may have similar \
                     frequencies, the overall pattern differs between datasets. Consider whether these differences are \
                     expected and how they might impact categorical analyses or predictive models."
                }
                (false, _) => {
                    "The categorical distributions are consistent across datasets. The relative frequencies of categories \
                     are similar, suggesting the datasets sample from the same population. This supports combining datasets \
                     for categorical analysis without significant bias concerns."
                }
            }),
        }
    }
}

/// A metadata entry attached to a [`TestResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Count(u64),
    Float(f64),
    Counts(Vec<u64>),
    Floats(Vec<f64>),
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        Self::Count(value as u64)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<usize>> for MetadataValue {
    fn from(values: Vec<usize>) -> Self {
        Self::Counts(values.into_iter().map(|v| v as u64).collect())
    }
}

impl From<Vec<f64>> for MetadataValue {
    fn from(values: Vec<f64>) -> Self {
        Self::Floats(values)
    }
}

/// Outcome of one statistical test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub kind: TestKind,
    pub test_name: String,
    pub description: String,
    pub statistic: f64,
    /// In `[0, 1]`, or [`NO_P_VALUE`].
    pub p_value: f64,
    pub alpha: f64,
    pub significant: bool,
    pub interpretation: String,
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl TestResult {
    /// Result of a test with a p-value; significant when `p_value < alpha`.
    pub fn from_p_value(kind: TestKind, statistic: f64, p_value: f64, alpha: f64) -> Self {
        let significant = p_value < alpha;
        Self::build(kind, statistic, p_value, alpha, significant)
    }

    /// Result of a test decided by a critical value comparison.
    pub fn from_critical_value(kind: TestKind, statistic: f64, significant: bool, alpha: f64) -> Self {
        Self::build(kind, statistic, NO_P_VALUE, alpha, significant)
    }

    fn build(kind: TestKind, statistic: f64, p_value: f64, alpha: f64, significant: bool) -> Self {
        Self {
            kind,
            test_name: kind.name(),
            description: kind.description().to_string(),
            statistic,
            p_value,
            alpha,
            significant,
            interpretation: interpret::interpret(kind, p_value, alpha, significant),
            metadata: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn has_p_value(&self) -> bool {
        self.p_value >= 0.0
    }

    /// Significant with a real p-value.
    pub fn is_significant_difference(&self) -> bool {
        self.has_p_value() && self.p_value < self.alpha
    }

    pub fn degrees_of_freedom(&self) -> Option<u64> {
        match self.metadata.get("degrees_of_freedom") {
            Some(MetadataValue::Count(dof)) => Some(*dof),
            _ => None,
        }
    }
}
