//! Source identity and user-facing load status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two logical data sources the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// User-appended delimited file (survey responses).
    Rows,
    /// Static structured reference file (song metadata).
    Records,
}

impl SourceKind {
    /// Short format label used in status messages.
    #[must_use]
    pub const fn format_label(&self) -> &'static str {
        match self {
            Self::Rows => "CSV",
            Self::Records => "JSON",
        }
    }

    /// Message shown when the source has nothing to load.
    #[must_use]
    pub const fn absent_message(&self) -> &'static str {
        match self {
            Self::Rows => "CSV file not found or empty. Add data from the Survey page.",
            Self::Records => "JSON file not found or empty.",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => write!(f, "row source"),
            Self::Records => write!(f, "record source"),
        }
    }
}

/// Severity of a source status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl StatusLevel {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Human-readable status for one source load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub kind: SourceKind,
    pub level: StatusLevel,
    pub message: String,
}

impl SourceStatus {
    /// Status for a source that loaded from `location`.
    pub fn loaded(kind: SourceKind, location: impl fmt::Display) -> Self {
        Self {
            kind,
            level: StatusLevel::Success,
            message: format!("Loaded {} from: {location}", kind.format_label()),
        }
    }

    /// Status for a source with nothing to load.
    #[must_use]
    pub fn absent(kind: SourceKind) -> Self {
        Self {
            kind,
            level: StatusLevel::Warning,
            message: kind.absent_message().to_string(),
        }
    }

    /// Status for a source whose content could not be parsed.
    pub fn failed(kind: SourceKind, reason: impl fmt::Display) -> Self {
        Self {
            kind,
            level: StatusLevel::Error,
            message: format!("Failed to read {}: {reason}", kind.format_label()),
        }
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.label(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_messages_differ_per_kind() {
        assert!(SourceKind::Rows.absent_message().contains("Survey page"));
        assert_eq!(
            SourceKind::Records.absent_message(),
            "JSON file not found or empty."
        );
    }

    #[test]
    fn test_status_display() {
        let status = SourceStatus::loaded(SourceKind::Rows, "data.csv");
        assert_eq!(status.to_string(), "[ok] Loaded CSV from: data.csv");

        let status = SourceStatus::failed(SourceKind::Records, "expected value at line 1");
        assert_eq!(status.level, StatusLevel::Error);
        assert_eq!(
            status.message,
            "Failed to read JSON: expected value at line 1"
        );
    }

    #[test]
    fn test_status_level_ordering() {
        assert!(StatusLevel::Error > StatusLevel::Warning);
        assert!(StatusLevel::Warning > StatusLevel::Success);
    }
}
