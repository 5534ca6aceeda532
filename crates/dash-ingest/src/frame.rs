//! Typed DataFrame construction shared by the row and record loaders.
//!
//! Both sources are reduced to column-major [`Cell`] vectors first; each
//! column's dtype is then chosen from the cells it actually holds.

use std::collections::HashSet;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::Result;

/// A single source value before the column dtype is decided.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Missing,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    fn render(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Int(v) => Some(v.to_string()),
            Self::Float(v) => Some(v.to_string()),
            Self::Bool(v) => Some(v.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

/// Column dtype chosen from the cells present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

fn column_kind(cells: &[Cell]) -> ColumnKind {
    let (mut has_int, mut has_float, mut has_bool, mut has_text) = (false, false, false, false);
    for cell in cells {
        match cell {
            Cell::Missing => {}
            Cell::Int(_) => has_int = true,
            Cell::Float(_) => has_float = true,
            Cell::Bool(_) => has_bool = true,
            Cell::Text(_) => has_text = true,
        }
    }
    let has_number = has_int || has_float;
    if has_text || (has_bool && has_number) {
        ColumnKind::Text
    } else if has_float {
        ColumnKind::Float
    } else if has_int {
        ColumnKind::Int
    } else if has_bool {
        ColumnKind::Bool
    } else {
        // Entirely missing: keep as text so string filters still apply.
        ColumnKind::Text
    }
}

/// Builds one typed column from its cells.
pub(crate) fn column_from_cells(name: &str, cells: &[Cell]) -> Column {
    let series = match column_kind(cells) {
        ColumnKind::Int => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Int(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Int(v) => Some(*v as f64),
                    Cell::Float(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Bool(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Text => {
            let values: Vec<Option<String>> = cells.iter().map(Cell::render).collect();
            Series::new(name.into(), values)
        }
    };
    series.into_column()
}

/// Infers cells for a column of delimited text.
///
/// Empty fields are missing. If every remaining field is an integer the
/// column is integral; if every one is a finite number it is floating;
/// otherwise the raw text is kept untouched.
pub(crate) fn infer_text_column(values: &[Option<String>]) -> Vec<Cell> {
    let present = || values.iter().flatten().map(|v| v.trim());

    let all_int = present().all(|v| v.parse::<i64>().is_ok());
    let all_float = present().all(|v| v.parse::<f64>().is_ok_and(f64::is_finite));

    values
        .iter()
        .map(|value| match value {
            None => Cell::Missing,
            Some(raw) if all_int => raw.trim().parse().map_or(Cell::Missing, Cell::Int),
            Some(raw) if all_float => raw.trim().parse().map_or(Cell::Missing, Cell::Float),
            Some(raw) => Cell::Text(raw.clone()),
        })
        .collect()
}

/// Makes header names usable as DataFrame column names.
///
/// Blank names become `Unnamed: <index>`; repeated names get a `.1`, `.2`
/// suffix in order of appearance.
pub(crate) fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, name) in raw.iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name.clone()
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}

/// Assembles a DataFrame from named column cells.
pub(crate) fn build_frame(headers: &[String], columns: &[Vec<Cell>]) -> Result<DataFrame> {
    let columns: Vec<Column> = headers
        .iter()
        .zip(columns)
        .map(|(name, cells)| column_from_cells(name, cells))
        .collect();
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;

    fn text(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| if v.is_empty() { None } else { Some((*v).to_string()) })
            .collect()
    }

    #[test]
    fn test_infer_integer_column() {
        let cells = infer_text_column(&text(&["5", " 10 ", ""]));
        assert_eq!(cells, vec![Cell::Int(5), Cell::Int(10), Cell::Missing]);
    }

    #[test]
    fn test_infer_float_column() {
        let cells = infer_text_column(&text(&["5", "2.5"]));
        assert_eq!(cells, vec![Cell::Float(5.0), Cell::Float(2.5)]);
    }

    #[test]
    fn test_infer_text_keeps_raw_values() {
        let cells = infer_text_column(&text(&["5.50", "abc"]));
        assert_eq!(
            cells,
            vec![Cell::Text("5.50".to_string()), Cell::Text("abc".to_string())]
        );
    }

    #[test]
    fn test_column_kind_mixed_bool_and_number_is_text() {
        let column = column_from_cells("x", &[Cell::Bool(true), Cell::Int(1)]);
        assert_eq!(column.dtype(), &DataType::String);
    }

    #[test]
    fn test_column_kind_int_and_float_is_float() {
        let column = column_from_cells("x", &[Cell::Int(1), Cell::Float(1.5), Cell::Missing]);
        assert_eq!(column.dtype(), &DataType::Float64);
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn test_unique_headers() {
        let raw = vec![
            "A".to_string(),
            String::new(),
            "A".to_string(),
            "A".to_string(),
        ];
        assert_eq!(unique_headers(&raw), vec!["A", "Unnamed: 1", "A.1", "A.2"]);
    }

    #[test]
    fn test_build_frame_shape() {
        let headers = vec!["Category".to_string(), "Value".to_string()];
        let columns = vec![
            vec![Cell::Text("Reading".into()), Cell::Text("Gaming".into())],
            vec![Cell::Int(5), Cell::Int(10)],
        ];
        let df = build_frame(&headers, &columns).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
        assert_eq!(df.column("Value").unwrap().dtype(), &DataType::Int64);
    }
}
