//! Headline figures and plain-language insights for a report.

use std::collections::BTreeSet;

use dfc_model::Dataset;
use serde::Serialize;

use crate::report::FieldComparison;

/// One headline figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub description: String,
}

impl SummaryCard {
    fn new(title: &str, value: String, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            value,
            description: description.into(),
        }
    }
}

/// Total records, common fields, missing data and dataset size range.
pub fn summary_cards(datasets: &[Dataset], common_fields: &[String]) -> Vec<SummaryCard> {
    let sizes: Vec<usize> = datasets.iter().map(Dataset::row_count).collect();
    let total: usize = sizes.iter().sum();

    let missing: usize = datasets
        .iter()
        .flat_map(|d| d.frame.get_columns())
        .map(|column| column.null_count())
        .sum();
    let cells: usize = datasets
        .iter()
        .map(|d| d.frame.height() * d.frame.width())
        .sum();
    let missing_pct = if cells > 0 {
        missing as f64 / cells as f64 * 100.0
    } else {
        0.0
    };

    let min = sizes.iter().copied().min().unwrap_or(0);
    let max = sizes.iter().copied().max().unwrap_or(0);

    vec![
        SummaryCard::new(
            "Total Records",
            thousands(total),
            format!("Across {} datasets", datasets.len()),
        ),
        SummaryCard::new(
            "Common Fields",
            common_fields.len().to_string(),
            "Fields present in all datasets",
        ),
        SummaryCard::new(
            "Missing Data",
            format!("{missing_pct:.1}%"),
            "Average across all datasets",
        ),
        SummaryCard::new(
            "Dataset Range",
            format!("{} - {}", thousands(min), thousands(max)),
            "Min to max records",
        ),
    ]
}

/// Significant fields, large size variation and common field coverage.
pub fn key_insights(
    datasets: &[Dataset],
    common_fields: &[String],
    fields: &[FieldComparison],
) -> Vec<String> {
    let mut insights = Vec::new();

    let significant: Vec<&str> = fields
        .iter()
        .filter(|f| f.has_significant_difference())
        .map(|f| f.field.as_str())
        .collect();
    if !significant.is_empty() {
        insights.push(format!(
            "Statistical tests revealed significant differences in: {}",
            significant.join(", ")
        ));
    }

    // First dataset wins ties on either end.
    let smallest = datasets
        .iter()
        .reduce(|best, d| if d.row_count() < best.row_count() { d } else { best });
    let largest = datasets
        .iter()
        .reduce(|best, d| if d.row_count() > best.row_count() { d } else { best });
    if let (Some(small), Some(large)) = (smallest, largest)
        && large.row_count() > small.row_count() * 2
    {
        insights.push(format!(
            "Large size variation detected: {} ({} records) vs {} ({} records)",
            small.name,
            thousands(small.row_count()),
            large.name,
            thousands(large.row_count()),
        ));
    }

    if !common_fields.is_empty() {
        let unique: BTreeSet<String> = datasets.iter().flat_map(Dataset::column_names).collect();
        let coverage = common_fields.len() as f64 / unique.len() as f64 * 100.0;
        insights.push(format!(
            "Common field coverage: {coverage:.1}% ({} out of {} total unique fields)",
            common_fields.len(),
            unique.len()
        ));
    }

    insights
}

/// `1234567` as `"1,234,567"`.
fn thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
