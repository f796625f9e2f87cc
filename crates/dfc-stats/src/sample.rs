//! Turning polars columns into test samples.

use std::fmt;

use polars::prelude::{AnyValue, Column, DataType};

/// Why a column could not be used as a numeric sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercionFailure {
    /// A value that does not parse as a number.
    NonNumeric { value: String },
    /// Nothing left once nulls and NaN are removed.
    Empty,
}

impl fmt::Display for CoercionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonNumeric { value } => write!(f, "non-numeric value {value:?}"),
            Self::Empty => f.write_str("no values after removing nulls"),
        }
    }
}

/// Integer, float and boolean storage.
pub fn is_numeric_storage(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Boolean
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Coerce a column to its non-null, non-NaN values as `f64`.
///
/// A single value that cannot be parsed fails the whole column.
pub fn coerce_numeric(column: &Column) -> Result<Vec<f64>, CoercionFailure> {
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        if let Some(number) = parse_value(value)?
            && !number.is_nan()
        {
            values.push(number);
        }
    }
    if values.is_empty() {
        return Err(CoercionFailure::Empty);
    }
    Ok(values)
}

fn parse_value(value: AnyValue<'_>) -> Result<Option<f64>, CoercionFailure> {
    let number = match value {
        AnyValue::Null => return Ok(None),
        AnyValue::Boolean(b) => {
            if b {
                1.0
            } else {
                0.0
            }
        }
        AnyValue::Int8(v) => f64::from(v),
        AnyValue::Int16(v) => f64::from(v),
        AnyValue::Int32(v) => f64::from(v),
        AnyValue::Int64(v) => v as f64,
        AnyValue::UInt8(v) => f64::from(v),
        AnyValue::UInt16(v) => f64::from(v),
        AnyValue::UInt32(v) => f64::from(v),
        AnyValue::UInt64(v) => v as f64,
        AnyValue::Float32(v) => f64::from(v),
        AnyValue::Float64(v) => v,
        AnyValue::String(s) => return parse_text(s),
        AnyValue::StringOwned(s) => return parse_text(&s),
        other => {
            return Err(CoercionFailure::NonNumeric {
                value: other.to_string(),
            });
        }
    };
    Ok(Some(number))
}

fn parse_text(text: &str) -> Result<Option<f64>, CoercionFailure> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| CoercionFailure::NonNumeric {
            value: text.to_string(),
        })
}

/// Non-null values of a column rendered as category labels.
pub fn categorical_values(column: &Column) -> Vec<String> {
    (0..column.len())
        .filter_map(|idx| column.get(idx).ok())
        .filter_map(category_label)
        .collect()
}

fn category_label(value: AnyValue<'_>) -> Option<String> {
    let label = match value {
        AnyValue::Null => return None,
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) if v.is_nan() => return None,
        AnyValue::Float64(v) => format_numeric(v),
        other => {
            let text = other.to_string();
            match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
                Some(inner) => inner.to_string(),
                None => text,
            }
        }
    };
    Some(label)
}

/// Float label without trailing zeros: `40.0` becomes `"40"`.
fn format_numeric(value: f64) -> String {
    let text = format!("{value}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
