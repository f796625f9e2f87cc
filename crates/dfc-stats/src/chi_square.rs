//! Chi-square test of independence on a samples × categories table.

use std::collections::{BTreeMap, BTreeSet};

use crate::special::chi_squared_sf;

/// Category counts per sample.
///
/// Rows are samples in input order; columns are the sorted union of every
/// category seen in any sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable {
    pub categories: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// Count each sample's values over the shared category axis.
    pub fn from_samples<S: AsRef<str>>(samples: &[Vec<S>]) -> Self {
        let categories: Vec<String> = samples
            .iter()
            .flatten()
            .map(|value| value.as_ref())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let position: BTreeMap<&str, usize> = categories
            .iter()
            .enumerate()
            .map(|(idx, category)| (category.as_str(), idx))
            .collect();

        let counts = samples
            .iter()
            .map(|values| {
                let mut row = vec![0u64; categories.len()];
                for value in values {
                    if let Some(&idx) = position.get(value.as_ref()) {
                        row[idx] += 1;
                    }
                }
                row
            })
            .collect();

        Self { categories, counts }
    }

    pub fn rows(&self) -> usize {
        self.counts.len()
    }

    pub fn columns(&self) -> usize {
        self.categories.len()
    }

    /// `(rows - 1) * (columns - 1)`.
    pub fn degrees_of_freedom(&self) -> usize {
        self.rows().saturating_sub(1) * self.columns().saturating_sub(1)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

/// Outcome of [`chi_square_independence`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquare {
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: usize,
}

/// Pearson chi-square test of independence.
///
/// Returns `None` for an empty or all-zero table and when any row sums to
/// zero, since expected frequencies are then undefined. Yates' continuity
/// correction applies when the table has one degree of freedom; zero degrees
/// of freedom give statistic 0 and p-value 1.
pub fn chi_square_independence(table: &ContingencyTable) -> Option<ChiSquare> {
    let total = table.total();
    if table.rows() == 0 || table.columns() == 0 || total == 0 {
        return None;
    }
    let row_sums: Vec<u64> = table.counts.iter().map(|row| row.iter().sum()).collect();
    if row_sums.contains(&0) {
        return None;
    }
    let column_sums: Vec<u64> = (0..table.columns())
        .map(|col| table.counts.iter().map(|row| row[col]).sum())
        .collect();

    let degrees_of_freedom = table.degrees_of_freedom();
    if degrees_of_freedom == 0 {
        return Some(ChiSquare {
            statistic: 0.0,
            p_value: 1.0,
            degrees_of_freedom,
        });
    }

    let total = total as f64;
    let yates = degrees_of_freedom == 1;
    let mut statistic = 0.0;
    for (row, row_sum) in table.counts.iter().zip(&row_sums) {
        for (&observed, column_sum) in row.iter().zip(&column_sums) {
            let expected = *row_sum as f64 * *column_sum as f64 / total;
            let mut difference = observed as f64 - expected;
            if yates {
                // Move each observation up to 0.5 toward its expectation.
                difference = difference.signum() * (difference.abs() - 0.5).max(0.0);
            }
            statistic += difference * difference / expected;
        }
    }

    Some(ChiSquare {
        statistic,
        p_value: chi_squared_sf(statistic, degrees_of_freedom as f64),
        degrees_of_freedom,
    })
}
