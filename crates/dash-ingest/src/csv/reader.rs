//! Delimited row-source reading.
//!
//! The first record is the header. Records longer than the header are
//! rejected; shorter records are padded with missing cells.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};
use crate::frame::{build_frame, infer_text_column, unique_headers};

/// Maximum file size for row-source loading (50 MB).
pub const MAX_ROW_SOURCE_SIZE: u64 = 50 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::SourceAbsent {
            location: path.display().to_string(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_ROW_SOURCE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Rejects files that start with a UTF-16 byte-order mark.
///
/// A UTF-8 BOM is accepted and stripped from the first header name.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a row-source file into a typed DataFrame.
pub fn read_row_source(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let df = read_rows_from(file, &path.display().to_string())?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read row source"
    );

    Ok(df)
}

/// Parses delimited text from any reader. `location` names the source in
/// error messages.
pub fn read_rows_from<R: Read>(reader: R, location: &str) -> Result<DataFrame> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records: Vec<(u64, Vec<String>)> = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::CsvParse {
            location: location.to_string(),
            message: e.to_string(),
        })?;
        if record.len() == 1 && record.get(0).is_some_and(str::is_empty) {
            continue;
        }
        let line = record
            .position()
            .map_or(idx as u64 + 1, csv::Position::line);
        records.push((line, record.iter().map(str::to_string).collect()));
    }

    frame_from_lines(records, location)
}

/// Builds a DataFrame from already-split records; the first is the header.
///
/// Used for in-memory row sources, which number their lines from 1.
pub fn frame_from_records(records: &[Vec<String>], location: &str) -> Result<DataFrame> {
    let numbered = records
        .iter()
        .enumerate()
        .filter(|(_, record)| !(record.len() == 1 && record[0].is_empty()))
        .map(|(idx, record)| (idx as u64 + 1, record.clone()))
        .collect();
    frame_from_lines(numbered, location)
}

fn frame_from_lines(records: Vec<(u64, Vec<String>)>, location: &str) -> Result<DataFrame> {
    let mut records = records.into_iter();
    let Some((_, raw_header)) = records.next() else {
        return Err(IngestError::SourceAbsent {
            location: location.to_string(),
        });
    };

    let raw_header: Vec<String> = raw_header
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = if idx == 0 {
                name.trim_start_matches('\u{feff}')
            } else {
                name
            };
            name.trim().to_string()
        })
        .collect();
    let headers = unique_headers(&raw_header);
    let width = headers.len();

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    for (line, record) in records {
        if record.len() > width {
            return Err(IngestError::CsvParse {
                location: location.to_string(),
                message: format!(
                    "Expected {width} fields in line {line}, saw {}",
                    record.len()
                ),
            });
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            let value = record
                .get(idx)
                .filter(|value| !value.is_empty())
                .cloned();
            column.push(value);
        }
    }

    let cells: Vec<_> = columns.iter().map(|values| infer_text_column(values)).collect();
    build_frame(&headers, &cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_row_source_with_header() {
        let file = create_temp_csv(b"Category,Value\nReading,5\nGaming,10\n");
        let df = read_row_source(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Category", "Value"]);
        assert_eq!(df.column("Value").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_header_only_file_has_zero_rows() {
        let file = create_temp_csv(b"Category,Value\n");
        let df = read_row_source(file.path()).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_bom_is_stripped_from_first_header() {
        let file = create_temp_csv("\u{feff}Category,Value\nReading,5\n".as_bytes());
        let df = read_row_source(file.path()).unwrap();
        assert!(df.column("Category").is_ok());
    }

    #[test]
    fn test_long_row_is_parse_error() {
        let file = create_temp_csv(b"Category,Value\nReading,5\nGaming,10,extra\n");
        let err = read_row_source(file.path()).unwrap_err();
        match err {
            IngestError::CsvParse { message, .. } => {
                assert_eq!(message, "Expected 2 fields in line 3, saw 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row_is_padded() {
        let file = create_temp_csv(b"Category,Value\nReading\n");
        let df = read_row_source(file.path()).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("Value").unwrap().null_count(), 1);
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let file = create_temp_csv(b"Category,Value\n\"Reading, mostly\",5\n");
        let df = read_row_source(file.path()).unwrap();
        let category = df.column("Category").unwrap().as_materialized_series();
        assert_eq!(category.str().unwrap().get(0), Some("Reading, mostly"));
    }

    #[test]
    fn test_utf16_bom_rejected() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'A', 0x00]);
        let err = read_row_source(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedEncoding { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let file = create_temp_csv(b"Category,Value\n\xC3\x28,5\n");
        let err = read_row_source(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::CsvParse { .. }));
    }

    #[test]
    fn test_file_size_limit() {
        let file = create_temp_csv(b"Category,Value\nReading,5\n");
        let err = check_file_size_with_limit(file.path(), 4).unwrap_err();
        assert!(matches!(err, IngestError::FileTooLarge { max_size: 4, .. }));
    }

    #[test]
    fn test_frame_from_records_empty_is_absent() {
        let err = frame_from_records(&[], "memory").unwrap_err();
        assert!(err.is_absent());
    }
}
