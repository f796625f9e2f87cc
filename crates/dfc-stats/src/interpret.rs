//! Interpretation text for test results.

use crate::result::TestKind;

/// Banded evidence statement for a p-value against `null_hypothesis`.
pub fn evidence(p_value: f64, alpha: f64, null_hypothesis: &str) -> String {
    if p_value < 0.001 {
        format!(
            "Very strong evidence against null hypothesis ({null_hypothesis}), p={p_value:.4}, α={alpha}"
        )
    } else if p_value < 0.01 {
        format!(
            "Strong evidence against null hypothesis ({null_hypothesis}), p={p_value:.4}, α={alpha}"
        )
    } else if p_value < alpha {
        format!("Significant at α={alpha} level ({null_hypothesis}), p={p_value:.4}")
    } else if p_value < 0.1 {
        format!("Not significant at α={alpha} level ({null_hypothesis}), p={p_value:.4}")
    } else {
        format!(
            "No significant evidence against null hypothesis ({null_hypothesis}), p={p_value:.4}, α={alpha}"
        )
    }
}

/// Binary statement for tests read off a critical value table.
pub fn critical_value_verdict(significant: bool, alpha: f64) -> String {
    if significant {
        format!("Statistically significant at α={alpha} level")
    } else {
        format!("Not significant at α={alpha} level")
    }
}

/// Full interpretation: the evidence statement, then any practical guidance.
pub fn interpret(kind: TestKind, p_value: f64, alpha: f64, significant: bool) -> String {
    let statement = if kind.reports_p_value() {
        evidence(p_value, alpha, kind.null_hypothesis())
    } else {
        critical_value_verdict(significant, alpha)
    };
    match kind.practical_guidance(p_value, significant) {
        Some(guidance) => format!("{statement} {guidance}"),
        None => statement,
    }
}
