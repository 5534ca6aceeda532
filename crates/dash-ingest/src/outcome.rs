//! Typed per-source load results.

use dash_model::{SourceKind, SourceStatus};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::repository::LoadedTable;

/// Result of loading one source. Loader failures never escape as errors;
/// they are captured here with their message intact.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// Nothing to load (missing or empty).
    Absent { message: String },
    /// Parsed table.
    Loaded { frame: DataFrame, location: String },
    /// Content exists but could not be read.
    LoadError { message: String },
}

impl LoadOutcome {
    /// Converts a repository result, separating "absent" from failures.
    pub fn from_result(result: Result<LoadedTable>) -> Self {
        match result {
            Ok(LoadedTable { frame, location }) => Self::Loaded { frame, location },
            Err(err) if err.is_absent() => Self::Absent {
                message: err.to_string(),
            },
            Err(err) => Self::LoadError {
                message: err.to_string(),
            },
        }
    }

    /// The loaded table, if any.
    pub fn frame(&self) -> Option<&DataFrame> {
        match self {
            Self::Loaded { frame, .. } => Some(frame),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent { .. })
    }

    /// Status banner for this outcome.
    pub fn status(&self, kind: SourceKind) -> SourceStatus {
        match self {
            Self::Loaded { location, .. } => SourceStatus::loaded(kind, location),
            Self::Absent { .. } => SourceStatus::absent(kind),
            Self::LoadError { message } => SourceStatus::failed(kind, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use dash_model::StatusLevel;

    #[test]
    fn test_absent_maps_to_warning() {
        let outcome = LoadOutcome::from_result(Err(IngestError::SourceAbsent {
            location: "data.csv".to_string(),
        }));
        assert!(outcome.is_absent());
        assert!(outcome.frame().is_none());
        assert_eq!(outcome.status(SourceKind::Rows).level, StatusLevel::Warning);
    }

    #[test]
    fn test_parse_failure_keeps_message() {
        let outcome = LoadOutcome::from_result(Err(IngestError::JsonParse {
            location: "data.json".to_string(),
            message: "EOF while parsing a list at line 1 column 2".to_string(),
        }));
        let LoadOutcome::LoadError { message } = &outcome else {
            panic!("expected a load error");
        };
        assert_eq!(
            message,
            "failed to parse JSON data.json: EOF while parsing a list at line 1 column 2"
        );
        let status = outcome.status(SourceKind::Records);
        assert_eq!(status.level, StatusLevel::Error);
        assert!(status.message.ends_with("line 1 column 2"));
    }

    #[test]
    fn test_loaded_status_names_location() {
        let outcome = LoadOutcome::from_result(Ok(LoadedTable {
            frame: DataFrame::empty(),
            location: "data.csv".to_string(),
        }));
        assert!(outcome.is_loaded());
        assert_eq!(
            outcome.status(SourceKind::Rows).message,
            "Loaded CSV from: data.csv"
        );
    }
}
