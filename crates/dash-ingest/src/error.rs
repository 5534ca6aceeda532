//! Error types for dashboard data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or appending source data.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Routine Conditions ===
    /// No candidate file exists with content. Expected before the first
    /// survey submission; never shown as a failure.
    #[error("no data at {location}")]
    SourceAbsent { location: String },

    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to append to file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is too large ({size} bytes, limit {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File starts with a byte-order mark for an encoding we do not read.
    #[error("unsupported encoding {encoding} in {path}; save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Malformed delimited content.
    #[error("failed to parse CSV {location}: {message}")]
    CsvParse { location: String, message: String },

    /// Invalid JSON syntax.
    #[error("failed to parse JSON {location}: {message}")]
    JsonParse { location: String, message: String },

    /// Valid JSON whose shape cannot be read as a table.
    #[error("unexpected record layout in {location}: {reason}")]
    RecordShape { location: String, reason: String },

    // === Repository Errors ===
    /// Source does not accept appends.
    #[error("{location} is read-only")]
    ReadOnly { location: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Returns true for the routine "nothing to load" condition.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::SourceAbsent { .. })
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
