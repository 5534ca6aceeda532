//! Record-source (JSON document) loading.
//!
//! # Accepted document shapes
//!
//! Checked in order, first match wins:
//!
//! 1. A top-level array: each element is one record.
//! 2. An object with a `data_points` array: that array holds the records.
//! 3. Any other object:
//!    - every value an array: column-oriented table, arrays of equal length;
//!    - arrays mixed with scalars: scalars repeat down the array length;
//!    - only scalars: a single row;
//!    - no keys: an empty table.
//!
//! Records must be objects. Columns are the union of record keys in
//! first-seen order; a key a record lacks is missing in that row.

use std::path::Path;

use dash_model::record_fields::DATA_POINTS;
use polars::prelude::DataFrame;
use serde_json::{Map, Value};

use crate::discovery::is_non_empty_file;
use crate::error::{IngestError, Result};
use crate::frame::{Cell, build_frame};

/// Which layout rule a document matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// Top-level array of records.
    RecordArray,
    /// Object wrapping the records in `data_points`.
    DataPoints,
    /// Object of equal-length arrays (scalars broadcast).
    ColumnMap,
    /// Object of scalars read as one record.
    SingleRecord,
    /// Object with no keys.
    Empty,
}

/// Classifies a parsed document, or `None` for a top-level scalar.
pub fn detect_shape(document: &Value) -> Option<DocumentShape> {
    match document {
        Value::Array(_) => Some(DocumentShape::RecordArray),
        Value::Object(map) => Some(match map.get(DATA_POINTS) {
            Some(Value::Array(_)) => DocumentShape::DataPoints,
            _ if map.is_empty() => DocumentShape::Empty,
            _ if map.values().any(Value::is_array) => DocumentShape::ColumnMap,
            _ => DocumentShape::SingleRecord,
        }),
        _ => None,
    }
}

/// Reads the record source at `path`.
pub fn read_record_source(path: &Path) -> Result<DataFrame> {
    if !is_non_empty_file(path) {
        return Err(IngestError::SourceAbsent {
            location: path.display().to_string(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            IngestError::JsonParse {
                location: path.display().to_string(),
                message: e.to_string(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let df = parse_record_document(&text, &path.display().to_string())?;
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read record source"
    );
    Ok(df)
}

/// Parses JSON text and normalizes it into a table.
pub fn parse_record_document(text: &str, location: &str) -> Result<DataFrame> {
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(IngestError::SourceAbsent {
            location: location.to_string(),
        });
    }
    let document: Value = serde_json::from_str(text).map_err(|e| IngestError::JsonParse {
        location: location.to_string(),
        message: e.to_string(),
    })?;
    normalize_document(document, location)
}

/// Converts a parsed document into a table per the shape rules above.
pub fn normalize_document(document: Value, location: &str) -> Result<DataFrame> {
    let shape_error = |reason: String| IngestError::RecordShape {
        location: location.to_string(),
        reason,
    };

    let Some(shape) = detect_shape(&document) else {
        return Err(shape_error(format!(
            "expected an array or object at the top level, found {}",
            value_kind(&document)
        )));
    };
    tracing::debug!(location, ?shape, "normalizing record document");

    match (shape, document) {
        (DocumentShape::RecordArray, Value::Array(records)) => {
            records_to_frame(records, location)
        }
        (DocumentShape::DataPoints, Value::Object(mut map)) => {
            match map.get_mut(DATA_POINTS).map(Value::take) {
                Some(Value::Array(records)) => records_to_frame(records, location),
                _ => Err(shape_error(format!("'{DATA_POINTS}' is not an array"))),
            }
        }
        (DocumentShape::ColumnMap, Value::Object(map)) => columns_to_frame(map, location),
        (DocumentShape::SingleRecord, Value::Object(map)) => {
            records_to_frame(vec![Value::Object(map)], location)
        }
        (DocumentShape::Empty, _) => Ok(DataFrame::empty()),
        (_, other) => Err(shape_error(format!(
            "unexpected {} at the top level",
            value_kind(&other)
        ))),
    }
}

fn records_to_frame(records: Vec<Value>, location: &str) -> Result<DataFrame> {
    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Map<String, Value>> = Vec::with_capacity(records.len());

    for (idx, record) in records.into_iter().enumerate() {
        let fields = match record {
            Value::Object(fields) => fields,
            other => {
                return Err(IngestError::RecordShape {
                    location: location.to_string(),
                    reason: format!("record {idx} is {}, expected an object", value_kind(&other)),
                });
            }
        };
        for key in fields.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        rows.push(fields);
    }

    // Key-less records still count as rows.
    if headers.is_empty() {
        return Ok(DataFrame::empty_with_height(rows.len()));
    }

    let columns: Vec<Vec<Cell>> = headers
        .iter()
        .map(|name| {
            rows.iter()
                .map(|row| row.get(name).map_or(Cell::Missing, json_cell))
                .collect()
        })
        .collect();

    build_frame(&headers, &columns)
}

fn columns_to_frame(map: Map<String, Value>, location: &str) -> Result<DataFrame> {
    let arrays: Vec<(&String, usize)> = map
        .iter()
        .filter_map(|(key, value)| value.as_array().map(|items| (key, items.len())))
        .collect();
    let Some(&(first_key, height)) = arrays.first() else {
        return records_to_frame(vec![Value::Object(map.clone())], location);
    };
    if let Some((key, len)) = arrays.iter().find(|(_, len)| *len != height) {
        return Err(IngestError::RecordShape {
            location: location.to_string(),
            reason: format!(
                "all arrays must be of the same length ('{first_key}' has {height}, '{key}' has {len})"
            ),
        });
    }

    let headers: Vec<String> = map.keys().cloned().collect();
    let columns: Vec<Vec<Cell>> = map
        .values()
        .map(|value| match value {
            Value::Array(items) => items.iter().map(json_cell).collect(),
            scalar => vec![json_cell(scalar); height],
        })
        .collect();

    build_frame(&headers, &columns)
}

fn json_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Missing,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(v) => Cell::Int(v),
            None => n.as_f64().map_or(Cell::Missing, Cell::Float),
        },
        Value::String(s) => Cell::Text(s.clone()),
        nested @ (Value::Array(_) | Value::Object(_)) => Cell::Text(nested.to_string()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
