//! Grouped means and top-N selection.

use std::cmp::Ordering;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::{Result, TransformError};
use crate::values::{column_numbers, column_strings};

/// Descending order with missing values last.
fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable descending sort of row indices by `keys`.
fn ranked_indices(keys: &[Option<f64>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| descending_missing_last(keys[a], keys[b]));
    order
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Mean of each `numeric_columns` entry per distinct `group_column` value.
///
/// Missing cells are ignored; a group with no values in a column gets a
/// missing mean. Rows with a missing group key are dropped. The result has
/// the group column followed by the means, sorted by `sort_column`
/// descending with missing values last and ties kept in first-seen order.
pub fn group_means(
    df: &DataFrame,
    group_column: &str,
    numeric_columns: &[&str],
    sort_column: &str,
) -> Result<DataFrame> {
    let sort_idx = numeric_columns
        .iter()
        .position(|name| *name == sort_column)
        .ok_or_else(|| TransformError::SortColumnNotAggregated {
            column: sort_column.to_string(),
        })?;

    let keys = column_strings(df, group_column)?;
    let values = numeric_columns
        .iter()
        .map(|name| column_numbers(df, name))
        .collect::<Result<Vec<_>>>()?;

    let mut groups: Vec<String> = Vec::new();
    let mut accumulators: Vec<Vec<Accumulator>> = Vec::new();
    for (row, key) in keys.iter().enumerate() {
        let Some(key) = key else {
            continue;
        };
        let slot = match groups.iter().position(|g| g == key) {
            Some(slot) => slot,
            None => {
                groups.push(key.clone());
                accumulators.push(
                    std::iter::repeat_with(Accumulator::default)
                        .take(numeric_columns.len())
                        .collect(),
                );
                groups.len() - 1
            }
        };
        for (acc, column) in accumulators[slot].iter_mut().zip(&values) {
            acc.push(column[row]);
        }
    }

    let means: Vec<Vec<Option<f64>>> = accumulators
        .iter()
        .map(|accs| accs.iter().map(Accumulator::mean).collect())
        .collect();
    let sort_keys: Vec<Option<f64>> = means.iter().map(|m| m[sort_idx]).collect();
    let order = ranked_indices(&sort_keys);

    let mut columns = Vec::with_capacity(numeric_columns.len() + 1);
    let labels: Vec<String> = order.iter().map(|&i| groups[i].clone()).collect();
    columns.push(Series::new(group_column.into(), labels).into_column());
    for (col_idx, name) in numeric_columns.iter().enumerate() {
        let column: Vec<Option<f64>> = order.iter().map(|&i| means[i][col_idx]).collect();
        columns.push(Series::new((*name).into(), column).into_column());
    }

    tracing::debug!(
        group_column,
        groups = groups.len(),
        rows = df.height(),
        "computed group means"
    );
    Ok(DataFrame::new(columns)?)
}

/// The `n` rows with the highest `value_column`, projected to the label and
/// value columns.
pub fn top_n(df: &DataFrame, label_column: &str, value_column: &str, n: usize) -> Result<DataFrame> {
    let labels = column_strings(df, label_column)?;
    let values = column_numbers(df, value_column)?;

    let order: Vec<usize> = ranked_indices(&values).into_iter().take(n).collect();
    let labels: Vec<Option<String>> = order.iter().map(|&i| labels[i].clone()).collect();
    let values: Vec<Option<f64>> = order.iter().map(|&i| values[i]).collect();

    Ok(DataFrame::new(vec![
        Series::new(label_column.into(), labels).into_column(),
        Series::new(value_column.into(), values).into_column(),
    ])?)
}
