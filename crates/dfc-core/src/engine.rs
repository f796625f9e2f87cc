//! Comparison orchestration.

use std::collections::{BTreeMap, BTreeSet};

use dfc_map::SchemaMapper;
use dfc_model::{ComparisonConfig, DataType, Dataset};
use dfc_stats::{StatisticalTester, StatsError};
use polars::prelude::{AnyValue, Column, PolarsResult};
use tracing::{Span, debug, info};

use crate::error::ComparisonError;
use crate::infer::infer_data_type;
use crate::report::{
    ComparisonReport, DatasetStandardization, FieldComparison, SkipReason, SkippedField,
};
use crate::summary::{key_insights, summary_cards};

/// Runs a full comparison over any number of datasets.
#[derive(Debug, Clone)]
pub struct ComparisonEngine {
    mapper: SchemaMapper,
    tester: StatisticalTester,
    alpha: f64,
    title: Option<String>,
    span: Span,
}

impl ComparisonEngine {
    /// Validate the configuration and build the mapper and tester.
    pub fn new(config: &ComparisonConfig) -> Result<Self, ComparisonError> {
        config.validate()?;
        let mapper = SchemaMapper::new(config.fields.clone())?
            .with_threshold(config.fuzzy_threshold);
        Ok(Self {
            mapper,
            tester: StatisticalTester::new(config.alpha),
            alpha: config.alpha,
            title: config.title.clone(),
            span: Span::none(),
        })
    }

    /// Attach the span that events from every stage are recorded under.
    #[must_use]
    pub fn with_span(self, span: Span) -> Self {
        Self {
            mapper: self.mapper.with_span(span.clone()),
            tester: self.tester.with_span(span.clone()),
            span,
            ..self
        }
    }

    pub fn mapper(&self) -> &SchemaMapper {
        &self.mapper
    }

    pub fn tester(&self) -> &StatisticalTester {
        &self.tester
    }

    /// Standardize, type and test every field shared by all datasets.
    ///
    /// Input order matters: the first dataset's column decides a field's
    /// type. Fields that cannot be tested are listed in
    /// [`ComparisonReport::skipped_fields`] rather than failing the run.
    pub fn compare(&self, datasets: Vec<Dataset>) -> Result<ComparisonReport, ComparisonError> {
        if datasets.is_empty() {
            return Err(ComparisonError::NoDatasets);
        }
        info!(parent: &self.span, datasets = datasets.len(), "starting comparison");

        let mut standardized = Vec::with_capacity(datasets.len());
        let mut standardization = Vec::with_capacity(datasets.len());
        for dataset in datasets {
            let result = self.mapper.standardize(&dataset.frame)?;
            info!(
                parent: &self.span,
                dataset = %dataset.name,
                renamed = result.renamed_count(),
                collisions = result.collisions.len(),
                "standardized dataset"
            );
            standardization.push(DatasetStandardization {
                dataset: dataset.name.clone(),
                rows: result.frame.height(),
                columns: result.frame.width(),
                matches: result.matches,
                collisions: result.collisions,
            });
            standardized.push(Dataset::new(dataset.name, result.frame));
        }

        let common = common_fields(&standardized);
        info!(parent: &self.span, common_fields = common.len(), "found common fields");

        let mut field_types = BTreeMap::new();
        let mut fields = Vec::new();
        let mut skipped_fields = Vec::new();
        for field in &common {
            let columns = field_columns(&standardized, field)?;
            let data_type = infer_data_type(&columns[0]);
            debug!(parent: &self.span, field = %field, data_type = %data_type, "inferred field type");
            field_types.insert(field.clone(), data_type);

            if !data_type.is_comparable() {
                continue;
            }
            if let Some(idx) = columns.iter().position(|c| !has_observations(c)) {
                let reason = SkipReason::EmptyColumn {
                    dataset: standardized[idx].name.clone(),
                };
                skipped_fields.push(self.skip(field, reason));
                continue;
            }

            let tests = match data_type {
                DataType::Numeric => match self.tester.compare_numeric(&columns) {
                    Ok(tests) => tests,
                    Err(StatsError::InsufficientData { usable }) => {
                        let reason = SkipReason::InsufficientData { usable };
                        skipped_fields.push(self.skip(field, reason));
                        continue;
                    }
                },
                DataType::Categorical => self.tester.compare_categorical(&columns),
                DataType::Datetime | DataType::Text | DataType::Unknown => continue,
            };
            fields.push(FieldComparison {
                field: field.clone(),
                data_type,
                tests,
            });
        }

        let summary_cards = summary_cards(&standardized, &common);
        let insights = key_insights(&standardized, &common, &fields);
        info!(
            parent: &self.span,
            compared = fields.len(),
            skipped = skipped_fields.len(),
            "comparison complete"
        );

        Ok(ComparisonReport {
            title: self
                .title
                .clone()
                .unwrap_or_else(|| format!("Comparison of {} Datasets", standardized.len())),
            alpha: self.alpha,
            datasets: standardization,
            common_fields: common,
            field_types,
            fields,
            skipped_fields,
            summary_cards,
            insights,
            standardized,
        })
    }

    fn skip(&self, field: &str, reason: SkipReason) -> SkippedField {
        debug!(parent: &self.span, field, reason = ?reason, "skipping field");
        SkippedField {
            field: field.to_string(),
            reason,
        }
    }
}

/// Column names present in every dataset, sorted.
pub fn common_fields(datasets: &[Dataset]) -> Vec<String> {
    let mut frames = datasets.iter();
    let Some(first) = frames.next() else {
        return Vec::new();
    };
    let mut common: BTreeSet<String> = first.column_names().into_iter().collect();
    for dataset in frames {
        let names: BTreeSet<String> = dataset.column_names().into_iter().collect();
        common.retain(|name| names.contains(name));
    }
    common.into_iter().collect()
}

/// True when the column holds at least one value that is neither null nor NaN.
fn has_observations(column: &Column) -> bool {
    if column.null_count() == column.len() {
        return false;
    }
    if !column.dtype().is_float() {
        return true;
    }
    (0..column.len()).any(|idx| match column.get(idx) {
        Ok(AnyValue::Float64(v)) => !v.is_nan(),
        Ok(AnyValue::Float32(v)) => !v.is_nan(),
        _ => false,
    })
}

fn field_columns(datasets: &[Dataset], field: &str) -> PolarsResult<Vec<Column>> {
    datasets
        .iter()
        .map(|d| d.frame.column(field).cloned())
        .collect()
}
