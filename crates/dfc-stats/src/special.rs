//! Reference distribution functions.
//!
//! Chi-squared and normal tails come from `statrs`. The Kolmogorov
//! distribution is not provided there and is evaluated here.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use statrs::distribution::{ChiSquared, ContinuousCDF};
use statrs::function::erf::erfc;

/// Below this z, `ln Φ(z)` uses the asymptotic Mills ratio expansion;
/// `erfc(-z / √2)` underflows not far past it.
const LOG_CDF_ASYMPTOTIC_Z: f64 = -25.0;

/// Survival function of the chi-squared distribution with `dof` degrees of
/// freedom.
pub fn chi_squared_sf(statistic: f64, dof: f64) -> f64 {
    if statistic.is_nan() || dof <= 0.0 {
        return f64::NAN;
    }
    if statistic <= 0.0 {
        return 1.0;
    }
    match ChiSquared::new(dof) {
        Ok(distribution) => distribution.sf(statistic).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}

/// `ln Φ(z)` for the standard normal, accurate in both tails.
pub fn normal_log_cdf(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    if z < LOG_CDF_ASYMPTOTIC_Z {
        // Φ(z) ≈ φ(z) / -z · (1 - 1/z² + 3/z⁴)
        let z2 = z * z;
        let series = 1.0 - 1.0 / z2 + 3.0 / (z2 * z2);
        return -0.5 * z2 - (-z).ln() - 0.5 * (2.0 * PI).ln() + series.ln();
    }
    if z < 0.0 {
        (0.5 * erfc(-z * FRAC_1_SQRT_2)).ln()
    } else {
        (-0.5 * erfc(z * FRAC_1_SQRT_2)).ln_1p()
    }
}

/// `ln(1 - Φ(z))`, accurate in both tails.
pub fn normal_log_sf(z: f64) -> f64 {
    normal_log_cdf(-z)
}

/// Survival function of the Kolmogorov distribution, `Q_KS(λ)`.
///
/// `Q_KS(λ) = 2 Σ_{j≥1} (-1)^{j-1} exp(-2 j² λ²)`, with `Q_KS(0) = 1`. Small
/// arguments use the dual (theta-function) series, which converges quickly
/// where the alternating series does not.
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda.is_nan() {
        return f64::NAN;
    }
    if lambda <= 0.0 {
        return 1.0;
    }
    if lambda < 1.18 {
        let y = (-PI * PI / (8.0 * lambda * lambda)).exp();
        let cdf = (2.0 * PI).sqrt() / lambda
            * (y + y.powi(9) + y.powi(25) + y.powi(49));
        (1.0 - cdf).clamp(0.0, 1.0)
    } else {
        let x = (-2.0 * lambda * lambda).exp();
        (2.0 * (x - x.powi(4) + x.powi(9))).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(left: f64, right: f64, tolerance: f64) -> bool {
        (left - right).abs() <= tolerance
    }

    #[test]
    fn chi_squared_sf_known_values() {
        // Two degrees of freedom: sf(x) = exp(-x / 2)
        assert!(close(chi_squared_sf(3.0, 2.0), (-1.5f64).exp(), 1e-12));
        assert!(close(chi_squared_sf(3.841_458_820_694_124, 1.0), 0.05, 1e-9));
        assert!(close(chi_squared_sf(11.070_497_693_516_351, 5.0), 0.05, 1e-9));
        assert_eq!(chi_squared_sf(0.0, 3.0), 1.0);
        assert!(chi_squared_sf(1.0, 0.0).is_nan());
    }

    #[test]
    fn normal_log_cdf_known_values() {
        assert!(close(normal_log_cdf(0.0), 0.5f64.ln(), 1e-15));
        assert!(close(
            normal_log_cdf(-1.0),
            0.158_655_253_931_457_05f64.ln(),
            1e-12
        ));
        assert!(close(normal_log_cdf(1.959_963_984_540_054), 0.975f64.ln(), 1e-12));
    }

    #[test]
    fn normal_log_tails_stay_finite() {
        let far = normal_log_cdf(-30.0);
        // ln Φ(-30) ≈ -454.3212
        assert!(close(far, -454.321_243_956, 1e-6));
        assert!(close(normal_log_cdf(-20.0), -203.917_155_371_097, 1e-6));
        assert!(close(normal_log_sf(30.0), far, 1e-12));

        // Past erfc underflow the expansion takes over.
        let beyond = normal_log_cdf(-40.0);
        assert!(beyond.is_finite());
        assert!(close(beyond, -804.608_442_013_754, 1e-6));
        assert!(close(normal_log_cdf(40.0), 0.0, 1e-300));
    }

    #[test]
    fn kolmogorov_sf_known_values() {
        assert_eq!(kolmogorov_sf(0.0), 1.0);
        assert!(close(kolmogorov_sf(1.358_099_9), 0.05, 1e-6));
        assert!(close(kolmogorov_sf(1.0), 0.269_999_671_677_355_5, 1e-9));
        assert!(kolmogorov_sf(0.2) > 0.999_99);
        assert!(kolmogorov_sf(5.0) < 1e-20);
    }
}
