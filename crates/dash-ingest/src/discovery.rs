//! Source file resolution.

use std::path::{Path, PathBuf};

/// Conventional row-source locations, in priority order, relative to the
/// data directory.
pub const ROW_SOURCE_CANDIDATES: [&str; 2] = ["data.csv", "pages/data.csv"];

/// Conventional record-source location relative to the data directory.
pub const RECORD_SOURCE_FILE: &str = "data.json";

/// Returns true if `path` is a regular file with at least one byte.
pub fn is_non_empty_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}

/// Returns the first candidate that exists and has content.
///
/// Candidates are checked in order; missing, zero-length and non-file
/// entries are skipped. Returns `None` when nothing qualifies.
pub fn resolve_source(candidates: &[PathBuf]) -> Option<PathBuf> {
    let resolved = candidates
        .iter()
        .find(|candidate| is_non_empty_file(candidate))
        .cloned();

    match &resolved {
        Some(path) => tracing::debug!(path = %path.display(), "resolved source file"),
        None => tracing::debug!(candidates = candidates.len(), "no source candidate has data"),
    }

    resolved
}

/// Default row-source candidates under `data_dir`.
pub fn default_row_candidates(data_dir: &Path) -> Vec<PathBuf> {
    ROW_SOURCE_CANDIDATES
        .iter()
        .map(|name| data_dir.join(name))
        .collect()
}

/// Joins candidate paths for messages ("a or b").
pub(crate) fn describe_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}
