//! Semantic type inference for a column.

use dfc_model::DataType;
use dfc_stats::is_numeric_storage;
use polars::prelude::Column;

/// Distinct-to-non-null ratio below which text is treated as categorical.
pub const CATEGORICAL_UNIQUE_RATIO: f64 = 0.05;

/// Classify a column by storage type, then by value diversity.
///
/// Numeric storage (integers, floats, booleans) is [`DataType::Numeric`] and
/// temporal storage is [`DataType::Datetime`]. Anything else is categorical
/// when fewer than 5% of its non-null values are distinct, text otherwise.
/// Columns with no non-null values, or whose distinct values cannot be
/// counted, are [`DataType::Unknown`].
pub fn infer_data_type(column: &Column) -> DataType {
    let dtype = column.dtype();
    if is_numeric_storage(dtype) {
        return DataType::Numeric;
    }
    if dtype.is_temporal() {
        return DataType::Datetime;
    }

    let non_null = column.len() - column.null_count();
    if non_null == 0 {
        return DataType::Unknown;
    }
    let Ok(distinct) = column.as_materialized_series().drop_nulls().n_unique() else {
        return DataType::Unknown;
    };

    let unique_ratio = distinct as f64 / non_null as f64;
    if unique_ratio < CATEGORICAL_UNIQUE_RATIO {
        DataType::Categorical
    } else {
        DataType::Text
    }
}
