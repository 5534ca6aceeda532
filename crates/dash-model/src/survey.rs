//! Survey submission type.

use serde::{Deserialize, Serialize};

/// One free-time survey answer.
///
/// Both fields are free text and are stored exactly as entered; numeric
/// interpretation of `value` happens only when charts coerce the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    /// What the respondent does in their free time.
    pub category: String,
    /// Hours per week, as typed.
    pub value: String,
}

impl SurveyResponse {
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
        }
    }

    /// The row appended to the row source: `[category, value]`.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![self.category.clone(), self.value.clone()]
    }
}
