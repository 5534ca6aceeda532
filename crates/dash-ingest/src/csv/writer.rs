//! Append-only row-source writing.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use csv::{Terminator, WriterBuilder};

use crate::discovery::is_non_empty_file;
use crate::error::{IngestError, Result};

/// What an append did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendReport {
    /// The file had no content before this append.
    pub created: bool,
    /// A header record was written ahead of the row.
    pub wrote_header: bool,
}

/// Appends one record to `path`, creating the file if needed.
///
/// When the file has no content yet and `header` is given, the header is
/// written first. The file is opened, written and closed within this call;
/// there is no locking.
pub fn append_record(path: &Path, row: &[String], header: Option<&[String]>) -> Result<AppendReport> {
    let created = !is_non_empty_file(path);
    let write_error = |e: std::io::Error| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_error)?;

    if !created && !ends_with_newline(path).map_err(write_error)? {
        tracing::debug!(path = %path.display(), "terminating last line before append");
        file.write_all(b"\n").map_err(write_error)?;
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);

    let header = header.filter(|_| created);
    if let Some(header) = header {
        writer
            .write_record(header)
            .map_err(|e| write_error(e.into()))?;
    }
    writer.write_record(row).map_err(|e| write_error(e.into()))?;
    writer.flush().map_err(write_error)?;

    if created && header.is_none() {
        tracing::warn!(
            path = %path.display(),
            "created row source without a header; the first row will be read as column names"
        );
    }

    Ok(AppendReport {
        created,
        wrote_header: header.is_some(),
    })
}

/// Whether the last byte of a non-empty file is `\n`.
fn ends_with_newline(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_append_creates_file_without_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");

        let report = append_record(&path, &row(&["Reading", "5"]), None).unwrap();
        assert!(report.created);
        assert!(!report.wrote_header);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Reading,5\n");
    }

    #[test]
    fn test_append_writes_header_only_on_creation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        let header = row(&["Category", "Value"]);

        append_record(&path, &row(&["Reading", "5"]), Some(&header)).unwrap();
        let report = append_record(&path, &row(&["Gaming", "10"]), Some(&header)).unwrap();

        assert!(!report.created);
        assert!(!report.wrote_header);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Category,Value\nReading,5\nGaming,10\n"
        );
    }

    #[test]
    fn test_append_after_unterminated_last_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "Category,Value\nReading,5").unwrap();

        let report = append_record(&path, &row(&["Gaming", "10"]), None).unwrap();

        assert!(!report.created);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Category,Value\nReading,5\nGaming,10\n"
        );
    }

    #[test]
    fn test_append_quotes_embedded_commas() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");

        append_record(&path, &row(&["Reading, mostly", "5"]), None).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "\"Reading, mostly\",5\n"
        );
    }

    #[test]
    fn test_append_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pages").join("data.csv");

        append_record(&path, &row(&["Reading", "5"]), None).unwrap();
        assert!(path.is_file());
    }
}
