//! Request-scoped ingestion of both sources.

use dash_model::{SourceKind, SourceStatus};
use tracing::{info, info_span, warn};

use crate::outcome::LoadOutcome;
use crate::repository::TableRepository;

/// Outcome of one source within a request.
#[derive(Debug, Clone)]
pub struct SourceLoad {
    pub kind: SourceKind,
    pub outcome: LoadOutcome,
}

impl SourceLoad {
    pub fn status(&self) -> SourceStatus {
        self.outcome.status(self.kind)
    }
}

/// Everything a visualization request needs. Each side is independent.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub rows: SourceLoad,
    pub records: SourceLoad,
}

impl DashboardData {
    /// Status banners in display order (rows, then records).
    pub fn statuses(&self) -> Vec<SourceStatus> {
        vec![self.rows.status(), self.records.status()]
    }
}

/// Loads one source, capturing every failure in the outcome.
pub fn load_source<R: TableRepository + ?Sized>(kind: SourceKind, repository: &R) -> SourceLoad {
    let span = info_span!("load_source", %kind, location = %repository.describe());
    let _guard = span.enter();

    let outcome = LoadOutcome::from_result(repository.load());
    match &outcome {
        LoadOutcome::Loaded { frame, location } => info!(
            location = %location,
            rows = frame.height(),
            columns = frame.width(),
            "source loaded"
        ),
        LoadOutcome::Absent { message } => info!(reason = %message, "source absent"),
        LoadOutcome::LoadError { message } => warn!(error = %message, "source failed to load"),
    }

    SourceLoad { kind, outcome }
}

/// Stateless pipeline over a row repository and a record repository.
///
/// Nothing is cached: every [`IngestPipeline::run`] re-reads both sources.
#[derive(Debug, Clone)]
pub struct IngestPipeline<R, J> {
    rows: R,
    records: J,
}

impl<R: TableRepository, J: TableRepository> IngestPipeline<R, J> {
    pub fn new(rows: R, records: J) -> Self {
        Self { rows, records }
    }

    /// Loads both sources. A failure on one side never affects the other.
    pub fn run(&self) -> DashboardData {
        let span = info_span!("ingest");
        let _guard = span.enter();

        DashboardData {
            rows: load_source(SourceKind::Rows, &self.rows),
            records: load_source(SourceKind::Records, &self.records),
        }
    }

    pub fn rows(&self) -> &R {
        &self.rows
    }

    pub fn records(&self) -> &J {
        &self.records
    }

    pub fn into_parts(self) -> (R, J) {
        (self.rows, self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryRecordSource, InMemoryRowSource};

    #[test]
    fn test_broken_record_source_does_not_affect_rows() {
        let rows = InMemoryRowSource::from_records([["Category", "Value"], ["Reading", "5"]]);
        let records = InMemoryRecordSource::new(Some("{not json".to_string()));

        let data = IngestPipeline::new(rows, records).run();

        assert!(data.rows.outcome.is_loaded());
        assert!(matches!(data.records.outcome, LoadOutcome::LoadError { .. }));
        assert_eq!(data.statuses().len(), 2);
    }

    #[test]
    fn test_both_absent() {
        let data =
            IngestPipeline::new(InMemoryRowSource::new(), InMemoryRecordSource::default()).run();
        assert!(data.rows.outcome.is_absent());
        assert!(data.records.outcome.is_absent());
    }
}
