//! Kruskal-Wallis H test.

use crate::special::chi_squared_sf;

/// Outcome of [`kruskal_wallis`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KruskalWallis {
    /// Tie-corrected H statistic.
    pub statistic: f64,
    pub p_value: f64,
    /// `k - 1` for `k` samples.
    pub degrees_of_freedom: usize,
}

/// Kruskal-Wallis H test on two or more non-empty samples.
///
/// Pooled observations get average ranks over ties; H is divided by the
/// tie correction `1 - Σ(t³ - t) / (N³ - N)` and referred to χ²(k - 1). When
/// every pooled value is identical there is nothing to rank and the result
/// is `H = 0`, `p = 1`.
pub fn kruskal_wallis(samples: &[Vec<f64>]) -> KruskalWallis {
    let groups = samples.len();
    let degrees_of_freedom = groups.saturating_sub(1);

    let mut pooled: Vec<(f64, usize)> = samples
        .iter()
        .enumerate()
        .flat_map(|(group, values)| values.iter().map(move |&v| (v, group)))
        .collect();
    pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total = pooled.len() as f64;
    let (ranks, tie_term) = average_ranks(&pooled);

    let mut rank_sums = vec![0.0; groups];
    for ((_, group), rank) in pooled.iter().zip(&ranks) {
        rank_sums[*group] += rank;
    }

    let mut h = 0.0;
    for (sum, values) in rank_sums.iter().zip(samples) {
        h += sum * sum / values.len() as f64;
    }
    h = 12.0 / (total * (total + 1.0)) * h - 3.0 * (total + 1.0);

    let correction = 1.0 - tie_term / (total * total * total - total);
    if correction <= 0.0 || !correction.is_finite() || degrees_of_freedom == 0 {
        return KruskalWallis {
            statistic: 0.0,
            p_value: 1.0,
            degrees_of_freedom,
        };
    }
    let statistic = (h / correction).max(0.0);

    KruskalWallis {
        statistic,
        p_value: chi_squared_sf(statistic, degrees_of_freedom as f64),
        degrees_of_freedom,
    }
}

/// Average 1-based ranks of sorted pairs, plus `Σ(t³ - t)` over tie groups.
fn average_ranks(sorted: &[(f64, usize)]) -> (Vec<f64>, f64) {
    let n = sorted.len();
    let mut ranks = vec![0.0; n];
    let mut tie_term = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && sorted[j].0 == sorted[i].0 {
            j += 1;
        }
        let rank = (i + 1 + j) as f64 / 2.0;
        for slot in ranks.iter_mut().take(j).skip(i) {
            *slot = rank;
        }
        let t = (j - i) as f64;
        tie_term += t * t * t - t;
        i = j;
    }
    (ranks, tie_term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separated_groups() {
        let result = kruskal_wallis(&[
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![6.0, 7.0, 8.0, 9.0, 10.0],
            vec![11.0, 12.0, 13.0, 14.0, 15.0],
        ]);
        // Rank sums 15, 40, 65 over N = 15: H = 12.5
        assert!((result.statistic - 12.5).abs() < 1e-9);
        assert_eq!(result.degrees_of_freedom, 2);
        assert!((result.p_value - (-6.25f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn ties_use_average_ranks_and_correction() {
        // Pooled [1, 1, 2, 2]: ranks 1.5, 1.5, 3.5, 3.5
        // H = 12/20 * (9/2 + 49/2) - 15 = 2.4, correction 1 - 12/60 = 0.8
        let result = kruskal_wallis(&[vec![1.0, 1.0], vec![2.0, 2.0]]);
        assert!((result.statistic - 3.0).abs() < 1e-9);
    }

    #[test]
    fn identical_values_carry_no_evidence() {
        let result = kruskal_wallis(&[vec![4.0; 3], vec![4.0; 5]]);
        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn identical_samples_are_not_different() {
        let sample = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = kruskal_wallis(&[sample.clone(), sample]);
        assert!(result.statistic.abs() < 1e-9);
        assert!(result.p_value > 0.999);
    }
}
