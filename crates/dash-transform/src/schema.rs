//! Column presence checks and column binding.
//!
//! Missing columns are not an error for charts; callers check first and
//! show an informational message instead.

use dash_model::row_fields;
use polars::prelude::DataFrame;

/// Required columns not present in `df`, in the order given.
pub fn missing_columns(df: &DataFrame, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| df.column(name).is_err())
        .map(|name| (*name).to_string())
        .collect()
}

/// True if every required column is present.
pub fn has_columns(df: &DataFrame, required: &[&str]) -> bool {
    missing_columns(df, required).is_empty()
}

/// How a chart column was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSource {
    /// Found under its canonical name.
    Canonical,
    /// Canonical name absent; taken by position.
    Positional(usize),
}

/// Columns used by the survey values chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryValueBinding {
    pub category: String,
    pub category_source: BindingSource,
    pub value: String,
    pub value_source: BindingSource,
}

impl CategoryValueBinding {
    pub fn is_positional(&self) -> bool {
        matches!(self.category_source, BindingSource::Positional(_))
            || matches!(self.value_source, BindingSource::Positional(_))
    }
}

/// Binds the category and value columns of a survey table.
///
/// Policy:
/// - `Category` / `Value` are used when present.
/// - Otherwise the category is column 0 and the value is column 1, or
///   column 0 again when the table has a single column.
///
/// Headerless row files, whose first submission became the header, are
/// read through the positional branch. Returns `None` for a table with no
/// columns.
pub fn bind_category_value(df: &DataFrame) -> Option<CategoryValueBinding> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    if names.is_empty() {
        return None;
    }

    let bind = |canonical: &str, position: usize| -> (String, BindingSource) {
        if names.iter().any(|name| name == canonical) {
            (canonical.to_string(), BindingSource::Canonical)
        } else {
            let position = position.min(names.len() - 1);
            (names[position].clone(), BindingSource::Positional(position))
        }
    };

    let (category, category_source) = bind(row_fields::CATEGORY, 0);
    let (value, value_source) = bind(row_fields::VALUE, 1);
    let binding = CategoryValueBinding {
        category,
        category_source,
        value,
        value_source,
    };

    if binding.is_positional() {
        tracing::warn!(
            category = %binding.category,
            value = %binding.value,
            "survey columns bound by position; expected 'Category' and 'Value' headers"
        );
    }

    Some(binding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame(names: &[&str]) -> DataFrame {
        DataFrame::new(
            names
                .iter()
                .map(|name| Series::new((*name).into(), ["x"]).into_column())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_columns() {
        let df = frame(&["Song", "Artist"]);
        assert_eq!(
            missing_columns(&df, &["Song", "Overall Rating"]),
            vec!["Overall Rating"]
        );
        assert!(has_columns(&df, &["Artist"]));
    }

    #[test]
    fn test_canonical_binding() {
        let binding = bind_category_value(&frame(&["Value", "Category"])).unwrap();
        assert_eq!(binding.category, "Category");
        assert_eq!(binding.value, "Value");
        assert!(!binding.is_positional());
    }

    #[test]
    fn test_positional_binding() {
        let binding = bind_category_value(&frame(&["Reading", "5"])).unwrap();
        assert_eq!(binding.category, "Reading");
        assert_eq!(binding.category_source, BindingSource::Positional(0));
        assert_eq!(binding.value, "5");
        assert_eq!(binding.value_source, BindingSource::Positional(1));
    }

    #[test]
    fn test_single_column_binds_twice() {
        let binding = bind_category_value(&frame(&["Hours"])).unwrap();
        assert_eq!(binding.category, "Hours");
        assert_eq!(binding.value, "Hours");
        assert_eq!(binding.value_source, BindingSource::Positional(0));
    }

    #[test]
    fn test_empty_frame_does_not_bind() {
        assert_eq!(bind_category_value(&DataFrame::empty()), None);
    }
}
