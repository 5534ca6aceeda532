//! Dashboard configuration file.
//!
//! Every key is optional. Relative paths are resolved against the data
//! directory.
//!
//! ```toml
//! data_dir = "site"
//!
//! [row_source]
//! candidates = ["data.csv", "pages/data.csv"]
//! append_to = "data.csv"
//! header = ["Category", "Value"]
//!
//! [record_source]
//! path = "data.json"
//!
//! [charts]
//! top_n = 10
//! max_min_value = 100
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dash_ingest::{CsvFileRepository, JsonFileRepository};
use dash_transform::TOP_RATED_LIMIT;
use serde::{Deserialize, Serialize};

/// File looked up in the data directory when `--config` is not given.
pub const CONFIG_FILENAME: &str = "dashboard.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Used when `--data-dir` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub row_source: RowSourceConfig,
    pub record_source: RecordSourceConfig,
    pub charts: ChartConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RowSourceConfig {
    /// Files tried in order; empty uses the built-in candidates.
    pub candidates: Vec<PathBuf>,
    /// Survey answers are appended here (default: first candidate).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append_to: Option<PathBuf>,
    /// Header written when the append target is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordSourceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Songs shown in the top ratings chart.
    pub top_n: usize,
    /// Largest accepted `--min-value`.
    pub max_min_value: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            top_n: TOP_RATED_LIMIT,
            max_min_value: 100,
        }
    }
}

impl DashboardConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse dashboard configuration")
    }

    /// Data directory: the flag, then the config value, then `.`.
    pub fn resolve_data_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Row-source repository rooted at `data_dir`.
    pub fn row_repository(&self, data_dir: &Path) -> CsvFileRepository {
        let mut repository = CsvFileRepository::new(data_dir);
        if !self.row_source.candidates.is_empty() {
            repository = repository.with_candidates(
                self.row_source
                    .candidates
                    .iter()
                    .map(|path| data_dir.join(path))
                    .collect(),
            );
        }
        if let Some(path) = &self.row_source.append_to {
            repository = repository.with_append_path(data_dir.join(path));
        }
        repository.with_header(self.row_source.header.clone())
    }

    /// Record-source repository rooted at `data_dir`.
    pub fn record_repository(&self, data_dir: &Path) -> JsonFileRepository {
        match &self.record_source.path {
            Some(path) => JsonFileRepository::new(data_dir.join(path)),
            None => JsonFileRepository::in_dir(data_dir),
        }
    }
}

/// Loads the configuration.
///
/// An explicit file must exist. Otherwise `<search_dir>/dashboard.toml` is
/// used when present, and defaults when not. A file that exists but does not
/// parse is an error.
pub fn load_config(explicit: Option<&Path>, search_dir: &Path) -> Result<DashboardConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = search_dir.join(CONFIG_FILENAME);
            if !candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "no configuration file, using defaults");
                return Ok(DashboardConfig::default());
            }
            candidate
        }
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("read configuration {}", path.display()))?;
    let config = DashboardConfig::from_toml(&text)
        .with_context(|| format!("load configuration {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_ingest::TableRepository;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.charts.top_n, 10);
        assert_eq!(config.charts.max_min_value, 100);
    }

    #[test]
    fn test_partial_file() {
        let config = DashboardConfig::from_toml(
            r#"
            [row_source]
            header = ["Category", "Value"]

            [charts]
            top_n = 5
            "#,
        )
        .unwrap();
        assert_eq!(
            config.row_source.header,
            Some(vec!["Category".to_string(), "Value".to_string()])
        );
        assert_eq!(config.charts.top_n, 5);
        assert_eq!(config.charts.max_min_value, 100);
        assert!(config.row_source.candidates.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(DashboardConfig::from_toml("[charts]\ntop = 3\n").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn test_discovered_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[record_source]\npath = \"songs.json\"\n",
        )
        .unwrap();
        let config = load_config(None, dir.path()).unwrap();
        let repository = config.record_repository(dir.path());
        assert_eq!(repository.path(), dir.path().join("songs.json"));
    }

    #[test]
    fn test_row_repository_paths() {
        let config = DashboardConfig::from_toml(
            "[row_source]\ncandidates = [\"answers.csv\"]\nappend_to = \"answers.csv\"\n",
        )
        .unwrap();
        let dir = Path::new("site");
        let repository = config.row_repository(dir);
        assert_eq!(repository.candidates(), &[dir.join("answers.csv")]);
        assert_eq!(repository.append_path(), dir.join("answers.csv"));
        assert!(repository.describe().contains("answers.csv"));
    }

    #[test]
    fn test_data_dir_precedence() {
        let config = DashboardConfig {
            data_dir: Some(PathBuf::from("from-config")),
            ..DashboardConfig::default()
        };
        assert_eq!(
            config.resolve_data_dir(Some(Path::new("from-flag"))),
            PathBuf::from("from-flag")
        );
        assert_eq!(config.resolve_data_dir(None), PathBuf::from("from-config"));
        assert_eq!(
            DashboardConfig::default().resolve_data_dir(None),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_round_trip() {
        let config = DashboardConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(DashboardConfig::from_toml(&text).unwrap(), config);
    }
}
