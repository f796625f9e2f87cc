//! Two-sample Kolmogorov-Smirnov test.

use crate::special::kolmogorov_sf;

/// Outcome of [`ks_two_sample`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KolmogorovSmirnov {
    /// Largest absolute gap between the two empirical distribution functions.
    pub statistic: f64,
    pub p_value: f64,
}

/// Two-sided two-sample Kolmogorov-Smirnov test.
///
/// The p-value is `Q_KS(√nₑ·D)` from the asymptotic Kolmogorov
/// distribution, `nₑ = n₁n₂/(n₁+n₂)`, with no small-sample correction.
/// Both samples must be non-empty and free of NaN.
pub fn ks_two_sample(first: &[f64], second: &[f64]) -> KolmogorovSmirnov {
    let mut x = first.to_vec();
    let mut y = second.to_vec();
    x.sort_by(f64::total_cmp);
    y.sort_by(f64::total_cmp);

    let statistic = max_ecdf_gap(&x, &y);
    let n1 = x.len() as f64;
    let n2 = y.len() as f64;
    let effective = (n1 * n2 / (n1 + n2)).sqrt();

    KolmogorovSmirnov {
        statistic,
        p_value: kolmogorov_sf(effective * statistic),
    }
}

/// `max |F1(v) - F2(v)|` over every observed value `v`; inputs sorted.
fn max_ecdf_gap(x: &[f64], y: &[f64]) -> f64 {
    let (n1, n2) = (x.len() as f64, y.len() as f64);
    let (mut i, mut j) = (0, 0);
    let mut gap: f64 = 0.0;
    while i < x.len() && j < y.len() {
        let value = x[i].min(y[j]);
        while i < x.len() && x[i] <= value {
            i += 1;
        }
        while j < y.len() && y[j] <= value {
            j += 1;
        }
        gap = gap.max((i as f64 / n1 - j as f64 / n2).abs());
    }
    gap
}
