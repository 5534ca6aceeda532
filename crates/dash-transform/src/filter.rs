//! Row filters.
//!
//! All filters return a new DataFrame and leave the input untouched. The
//! interactive chart applies them as coerce → drop missing → text filter →
//! threshold.

use std::collections::BTreeSet;

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};

use crate::error::Result;
use crate::values::{column_missing, column_numbers, column_strings};

fn filter_rows(df: &DataFrame, mask: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("mask".into(), mask);
    Ok(df.filter(&mask)?)
}

/// Removes rows where any of `columns` is missing.
pub fn drop_missing(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];
    for column in columns {
        for (slot, missing) in keep.iter_mut().zip(column_missing(df, column)?) {
            *slot &= !missing;
        }
    }
    filter_rows(df, &keep)
}

/// Keeps rows whose `column` contains `query`, ignoring case.
///
/// The query is matched literally. An empty query keeps every row; missing
/// cells never match a non-empty query.
pub fn filter_contains(df: &DataFrame, column: &str, query: &str) -> Result<DataFrame> {
    if query.is_empty() {
        return Ok(df.clone());
    }
    let needle = query.to_lowercase();
    let keep: Vec<bool> = column_strings(df, column)?
        .iter()
        .map(|value| {
            value
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(&needle))
        })
        .collect();
    filter_rows(df, &keep)
}

/// Keeps rows whose numeric `column` is at least `min`. Missing and
/// non-numeric cells are dropped.
pub fn filter_at_least(df: &DataFrame, column: &str, min: f64) -> Result<DataFrame> {
    let keep: Vec<bool> = column_numbers(df, column)?
        .iter()
        .map(|value| value.is_some_and(|v| v >= min))
        .collect();
    filter_rows(df, &keep)
}

/// Keeps rows whose `column` equals one of `allowed`. An empty selection
/// keeps every row.
pub fn filter_in(df: &DataFrame, column: &str, allowed: &[String]) -> Result<DataFrame> {
    if allowed.is_empty() {
        return Ok(df.clone());
    }
    let keep: Vec<bool> = column_strings(df, column)?
        .iter()
        .map(|value| value.as_ref().is_some_and(|v| allowed.contains(v)))
        .collect();
    filter_rows(df, &keep)
}

/// Sorted distinct non-missing values of `column`.
pub fn distinct_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let values: BTreeSet<String> = column_strings(df, column)?.into_iter().flatten().collect();
    Ok(values.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Series::new("Category".into(), [Some("Reading"), Some("Gaming"), None])
                .into_column(),
            Series::new("Value".into(), [Some(5.0), Some(10.0), None]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_drop_missing() {
        let df = drop_missing(&sample(), &["Value"]).unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_filter_contains_case_insensitive() {
        let df = filter_contains(&sample(), "Category", "GAM").unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(
            column_strings(&df, "Category").unwrap(),
            vec![Some("Gaming".to_string())]
        );
    }

    #[test]
    fn test_filter_contains_is_literal() {
        let df = filter_contains(&sample(), "Category", "R.*").unwrap();
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_filter_contains_empty_query_keeps_missing() {
        let df = filter_contains(&sample(), "Category", "").unwrap();
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_filter_at_least_excludes_missing() {
        let df = filter_at_least(&sample(), "Value", 0.0).unwrap();
        assert_eq!(df.height(), 2);
        let df = filter_at_least(&sample(), "Value", 6.0).unwrap();
        assert_eq!(column_numbers(&df, "Value").unwrap(), vec![Some(10.0)]);
    }

    #[test]
    fn test_filter_in() {
        let allowed = vec!["Reading".to_string()];
        assert_eq!(filter_in(&sample(), "Category", &allowed).unwrap().height(), 1);
        assert_eq!(filter_in(&sample(), "Category", &[]).unwrap().height(), 3);
    }

    #[test]
    fn test_distinct_values_sorted() {
        let df = DataFrame::new(vec![
            Series::new("Mood Fit".into(), [Some("Sad"), Some("Happy"), None, Some("Sad")])
                .into_column(),
        ])
        .unwrap();
        assert_eq!(distinct_values(&df, "Mood Fit").unwrap(), vec!["Happy", "Sad"]);
    }

    #[test]
    fn test_unknown_column() {
        assert!(filter_at_least(&sample(), "Hours", 0.0).is_err());
    }
}
