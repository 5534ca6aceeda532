//! Numeric coercion of table columns.
//!
//! Coercion never fails on content: cells that do not read as numbers
//! become missing and drop out of later filters and means.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::Result;
use crate::values::column_numbers;

/// Parse a string value to numeric (f64).
///
/// Handles common numeric formats:
/// - Standard numbers: "123", "-45.67"
/// - Whitespace: "  123  "
/// - Scientific notation: "1.23e5"
/// - Infinities: "inf", "-Infinity"
///
/// Returns None for empty text, "nan", and anything else that is not a
/// number. Thousands separators are not accepted.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Check if a string represents a valid numeric value.
pub fn is_numeric(value: &str) -> bool {
    parse_numeric(value).is_some()
}

/// Returns a copy of `df` with `column` converted to Float64.
pub fn coerce_numeric(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let values = column_numbers(df, column)?;
    let failed = values.iter().filter(|v| v.is_none()).count();

    let mut out = df.clone();
    out.with_column(Series::new(column.into(), values).into_column())?;

    tracing::debug!(column, rows = df.height(), missing = failed, "coerced column to numeric");
    Ok(out)
}

/// Coerces several columns in order.
pub fn coerce_numeric_columns(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let mut out = df.clone();
    for column in columns {
        out = coerce_numeric(&out, column)?;
    }
    Ok(out)
}
