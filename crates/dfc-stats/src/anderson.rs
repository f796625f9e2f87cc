//! Anderson-Darling test for normality.
//!
//! The statistic uses the sample mean and the `ddof = 1` standard deviation.
//! There is no p-value; significance is read off a table of critical values
//! adjusted for sample size.

use crate::special::{normal_log_cdf, normal_log_sf};

/// Significance levels, in percent, of the critical value table.
pub const SIGNIFICANCE_LEVELS: [f64; 5] = [15.0, 10.0, 5.0, 2.5, 1.0];

/// Critical values before the sample size adjustment. Adjusted values are
/// rounded to 3 decimals.
pub const CRITICAL_VALUE_BASE: [f64; 5] = [0.576, 0.656, 0.787, 0.918, 1.092];

/// Max distance between alpha and a table level for that row to apply.
const LEVEL_TOLERANCE: f64 = 0.01;

/// Outcome of [`anderson_darling_normal`].
#[derive(Debug, Clone, PartialEq)]
pub struct AndersonDarling {
    /// A² statistic; NaN when the sample has zero variance.
    pub statistic: f64,
    pub critical_values: Vec<f64>,
    pub significance_levels: Vec<f64>,
}

impl AndersonDarling {
    /// Critical value for the first table level within 0.01 of `alpha`.
    pub fn critical_value_at(&self, alpha: f64) -> Option<f64> {
        self.significance_levels
            .iter()
            .position(|level| (level / 100.0 - alpha).abs() < LEVEL_TOLERANCE)
            .map(|row| self.critical_values[row])
    }

    /// Whether normality is rejected at `alpha`.
    ///
    /// False when no table level is close enough to `alpha` and when the
    /// statistic is NaN.
    pub fn rejects_normality(&self, alpha: f64) -> bool {
        self.critical_value_at(alpha)
            .is_some_and(|critical| self.statistic > critical)
    }
}

/// Anderson-Darling normality test of one sample.
pub fn anderson_darling_normal(sample: &[f64]) -> AndersonDarling {
    let n = sample.len() as f64;
    let scale = 1.0 + 4.0 / n - 25.0 / (n * n);
    let critical_values = CRITICAL_VALUE_BASE
        .iter()
        .map(|base| round_to_thousandths(base / scale))
        .collect();

    AndersonDarling {
        statistic: statistic(sample),
        critical_values,
        significance_levels: SIGNIFICANCE_LEVELS.to_vec(),
    }
}

fn round_to_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn statistic(sample: &[f64]) -> f64 {
    let count = sample.len();
    if count < 2 {
        return f64::NAN;
    }
    let n = count as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let variance = sample.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();
    if std_dev == 0.0 || !std_dev.is_finite() {
        return f64::NAN;
    }

    let mut z: Vec<f64> = sample.iter().map(|v| (v - mean) / std_dev).collect();
    z.sort_by(f64::total_cmp);

    let sum: f64 = (0..count)
        .map(|i| {
            let weight = (2 * i + 1) as f64;
            weight * (normal_log_cdf(z[i]) + normal_log_sf(z[count - 1 - i]))
        })
        .sum();
    -n - sum / n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_values_shrink_with_small_samples() {
        let result = anderson_darling_normal(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        // n = 5: 1 + 0.8 - 1.0 = 0.8, so 0.787 / 0.8 = 0.98375 rounds to 0.984
        let expected = [0.72, 0.82, 0.984, 1.148, 1.365];
        for (got, want) in result.critical_values.iter().zip(&expected) {
            assert!((got - want).abs() < 1e-12);
        }
        assert_eq!(result.significance_levels, SIGNIFICANCE_LEVELS.to_vec());
    }

    #[test]
    fn evenly_spaced_sample_statistic() {
        let result = anderson_darling_normal(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((result.statistic - 0.143_594_203_672_524_4).abs() < 1e-9);
        assert!(!result.rejects_normality(0.05));
    }

    #[test]
    fn skewed_sample_is_rejected() {
        let sample = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 50.0];
        let result = anderson_darling_normal(&sample);
        assert!(result.rejects_normality(0.05));
    }

    #[test]
    fn level_lookup_uses_tolerance() {
        let result = anderson_darling_normal(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let at = |alpha| result.critical_value_at(alpha).unwrap();
        assert!((at(0.05) - 0.984).abs() < 1e-12);
        assert!((at(0.1) - 0.82).abs() < 1e-12);
        // Only the 1% row is within 0.01.
        assert!((at(0.012) - 1.365).abs() < 1e-12);
        assert_eq!(result.critical_value_at(0.5), None);
    }

    #[test]
    fn rounded_critical_value_decides_the_boundary() {
        let mut result = anderson_darling_normal(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        // Above the unrounded 0.98375 but not above the table's 0.984.
        result.statistic = 0.9838;
        assert!(!result.rejects_normality(0.05));
        result.statistic = 0.9841;
        assert!(result.rejects_normality(0.05));
    }

    #[test]
    fn zero_variance_is_never_significant() {
        let result = anderson_darling_normal(&[3.0; 6]);
        assert!(result.statistic.is_nan());
        assert!(!result.rejects_normality(0.05));
    }
}
