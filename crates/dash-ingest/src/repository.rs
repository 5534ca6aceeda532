//! Storage seam for both sources.
//!
//! The pipeline and the survey collector only see [`TableRepository`], so
//! tests can swap the on-disk files for in-memory sources with the same
//! semantics.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::csv::{append_record, frame_from_records, read_row_source};
use crate::discovery::{
    RECORD_SOURCE_FILE, default_row_candidates, describe_candidates, resolve_source,
};
use crate::error::{IngestError, Result};
use crate::record::{parse_record_document, read_record_source};

/// A successfully loaded table and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub frame: DataFrame,
    pub location: String,
}

/// A source that can be loaded as a table and, optionally, appended to.
pub trait TableRepository {
    /// Human-readable location used in messages.
    fn describe(&self) -> String;

    /// Reads the whole source. Returns [`IngestError::SourceAbsent`] when
    /// there is nothing to read.
    fn load(&self) -> Result<LoadedTable>;

    /// Appends one row. Read-only sources return [`IngestError::ReadOnly`].
    fn append(&mut self, row: &[String]) -> Result<()>;
}

// =============================================================================
// File-backed repositories
// =============================================================================

/// Survey responses stored in a delimited file.
#[derive(Debug, Clone)]
pub struct CsvFileRepository {
    candidates: Vec<PathBuf>,
    append_to: PathBuf,
    header: Option<Vec<String>>,
}

impl CsvFileRepository {
    /// Uses the conventional locations under `data_dir`; appends go to the
    /// first of them.
    pub fn new(data_dir: &Path) -> Self {
        let candidates = default_row_candidates(data_dir);
        let append_to = candidates[0].clone();
        Self {
            candidates,
            append_to,
            header: None,
        }
    }

    /// Replaces the read candidates (priority order).
    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Sets the file appends are written to.
    #[must_use]
    pub fn with_append_path(mut self, path: PathBuf) -> Self {
        self.append_to = path;
        self
    }

    /// Writes `header` ahead of the first row when the append creates the
    /// file. Without it the first submitted row becomes the header on load.
    #[must_use]
    pub fn with_header(mut self, header: Option<Vec<String>>) -> Self {
        self.header = header;
        self
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    pub fn append_path(&self) -> &Path {
        &self.append_to
    }
}

impl TableRepository for CsvFileRepository {
    fn describe(&self) -> String {
        describe_candidates(&self.candidates)
    }

    fn load(&self) -> Result<LoadedTable> {
        let Some(path) = resolve_source(&self.candidates) else {
            return Err(IngestError::SourceAbsent {
                location: self.describe(),
            });
        };
        let frame = read_row_source(&path)?;
        Ok(LoadedTable {
            frame,
            location: path.display().to_string(),
        })
    }

    fn append(&mut self, row: &[String]) -> Result<()> {
        let report = append_record(&self.append_to, row, self.header.as_deref())?;
        tracing::info!(
            path = %self.append_to.display(),
            created = report.created,
            wrote_header = report.wrote_header,
            "appended survey row"
        );
        Ok(())
    }
}

/// Static song records stored in one JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses `data.json` under `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(RECORD_SOURCE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableRepository for JsonFileRepository {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<LoadedTable> {
        let frame = read_record_source(&self.path)?;
        Ok(LoadedTable {
            frame,
            location: self.describe(),
        })
    }

    fn append(&mut self, _row: &[String]) -> Result<()> {
        Err(IngestError::ReadOnly {
            location: self.describe(),
        })
    }
}

// =============================================================================
// In-memory repositories
// =============================================================================

const MEMORY_ROWS: &str = "memory:rows";
const MEMORY_RECORDS: &str = "memory:records";

/// Row source held as split records; the first record is the header, as in
/// the file version.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRowSource {
    records: Vec<Vec<String>>,
    header: Option<Vec<String>>,
}

impl InMemoryRowSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing records (header first).
    pub fn from_records<I, R, S>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: records
                .into_iter()
                .map(|record| record.into_iter().map(Into::into).collect())
                .collect(),
            header: None,
        }
    }

    /// Same header policy as [`CsvFileRepository::with_header`].
    #[must_use]
    pub fn with_header(mut self, header: Option<Vec<String>>) -> Self {
        self.header = header;
        self
    }

    /// Raw records, header included.
    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }
}

impl TableRepository for InMemoryRowSource {
    fn describe(&self) -> String {
        MEMORY_ROWS.to_string()
    }

    fn load(&self) -> Result<LoadedTable> {
        let frame = frame_from_records(&self.records, MEMORY_ROWS)?;
        Ok(LoadedTable {
            frame,
            location: self.describe(),
        })
    }

    fn append(&mut self, row: &[String]) -> Result<()> {
        if self.records.is_empty() {
            if let Some(header) = &self.header {
                self.records.push(header.clone());
            }
        }
        self.records.push(row.to_vec());
        Ok(())
    }
}

/// Record source held as JSON text. `None` or blank text is absent.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSource {
    text: Option<String>,
}

impl InMemoryRecordSource {
    pub fn new(text: Option<String>) -> Self {
        Self { text }
    }

    pub fn from_json(document: &serde_json::Value) -> Self {
        Self::new(Some(document.to_string()))
    }
}

impl TableRepository for InMemoryRecordSource {
    fn describe(&self) -> String {
        MEMORY_RECORDS.to_string()
    }

    fn load(&self) -> Result<LoadedTable> {
        let text = self.text.as_deref().unwrap_or_default();
        let frame = parse_record_document(text, MEMORY_RECORDS)?;
        Ok(LoadedTable {
            frame,
            location: self.describe(),
        })
    }

    fn append(&mut self, _row: &[String]) -> Result<()> {
        Err(IngestError::ReadOnly {
            location: self.describe(),
        })
    }
}
