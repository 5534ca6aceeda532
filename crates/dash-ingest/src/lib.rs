//! Dashboard data ingestion.
//!
//! This crate loads the two dashboard sources into Polars DataFrames:
//!
//! - **Row source**: survey responses in a delimited file, appended to by the
//!   survey and read wholesale on every request
//! - **Record source**: a static JSON document of song records
//!
//! Every load is turned into a [`LoadOutcome`]; nothing here panics or lets
//! one source's failure affect the other.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dash_ingest::{CsvFileRepository, IngestPipeline, JsonFileRepository};
//!
//! let data_dir = Path::new(".");
//! let pipeline = IngestPipeline::new(
//!     CsvFileRepository::new(data_dir),
//!     JsonFileRepository::in_dir(data_dir),
//! );
//!
//! let data = pipeline.run();
//! for status in data.statuses() {
//!     println!("{status}");
//! }
//! ```

mod csv;
mod discovery;
mod error;
mod frame;
mod outcome;
mod pipeline;
mod record;
mod repository;
mod survey;

// === Error Types ===
pub use error::{IngestError, Result};

// === Source Resolution ===
pub use discovery::{
    RECORD_SOURCE_FILE, ROW_SOURCE_CANDIDATES, default_row_candidates, is_non_empty_file,
    resolve_source,
};

// === Row Source ===
pub use self::csv::{
    AppendReport, MAX_ROW_SOURCE_SIZE, append_record, check_file_size,
    check_file_size_with_limit, frame_from_records, read_row_source, read_rows_from,
    validate_encoding,
};

// === Record Source ===
pub use record::{
    DocumentShape, detect_shape, normalize_document, parse_record_document, read_record_source,
};

// === Repositories ===
pub use repository::{
    CsvFileRepository, InMemoryRecordSource, InMemoryRowSource, JsonFileRepository,
    LoadedTable, TableRepository,
};

// === Pipeline ===
pub use outcome::LoadOutcome;
pub use pipeline::{DashboardData, IngestPipeline, SourceLoad, load_source};
pub use survey::SurveyCollector;
