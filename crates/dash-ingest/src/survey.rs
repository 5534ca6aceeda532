//! Survey submission path.

use dash_model::{SourceKind, SurveyResponse};

use crate::error::Result;
use crate::pipeline::{SourceLoad, load_source};
use crate::repository::TableRepository;

/// Appends survey responses to a row repository.
#[derive(Debug, Clone)]
pub struct SurveyCollector<R> {
    repository: R,
}

impl<R: TableRepository> SurveyCollector<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Appends exactly `[category, value]`.
    pub fn submit(&mut self, response: &SurveyResponse) -> Result<()> {
        self.repository.append(&response.to_row())
    }

    /// Current contents of the row source, for display after submitting.
    pub fn current(&self) -> SourceLoad {
        load_source(SourceKind::Rows, &self.repository)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_inner(self) -> R {
        self.repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRowSource;

    #[test]
    fn test_submit_appends_category_then_value() {
        let rows = InMemoryRowSource::from_records([["Category", "Value"]]);
        let mut collector = SurveyCollector::new(rows);

        collector
            .submit(&SurveyResponse::new("Reading", "5"))
            .unwrap();

        assert_eq!(
            collector.repository().records().last(),
            Some(&vec!["Reading".to_string(), "5".to_string()])
        );
        let current = collector.current();
        assert_eq!(current.outcome.frame().map(|df| df.height()), Some(1));
    }
}
