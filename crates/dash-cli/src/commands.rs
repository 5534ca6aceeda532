//! Command implementations.
//!
//! Commands build reports; printing lives in [`crate::render`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dash_ingest::{
    CsvFileRepository, DashboardData, IngestPipeline, JsonFileRepository, SourceLoad,
    SurveyCollector,
};
use dash_model::{GroupBy, SurveyResponse};
use dash_transform::{
    ChartData, EnergyLyricsChart, EnergyLyricsOptions, TopRatedChart, ValueChart, ValueFilter,
    mood_options, prepare_energy_lyrics, prepare_top_rated, prepare_value_chart,
};
use tracing::{info, info_span};

use crate::config::DashboardConfig;

/// Data directory and configuration shared by every command.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub data_dir: PathBuf,
    pub config: DashboardConfig,
}

impl DashboardContext {
    pub fn new(data_dir: impl Into<PathBuf>, config: DashboardConfig) -> Self {
        Self {
            data_dir: data_dir.into(),
            config,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn row_repository(&self) -> CsvFileRepository {
        self.config.row_repository(&self.data_dir)
    }

    pub fn record_repository(&self) -> JsonFileRepository {
        self.config.record_repository(&self.data_dir)
    }

    pub fn pipeline(&self) -> IngestPipeline<CsvFileRepository, JsonFileRepository> {
        IngestPipeline::new(self.row_repository(), self.record_repository())
    }
}

// =============================================================================
// survey
// =============================================================================

#[derive(Debug)]
pub struct SurveyReport {
    pub response: SurveyResponse,
    /// File the answer was appended to.
    pub written_to: PathBuf,
    /// Survey table after the append.
    pub table: SourceLoad,
}

/// Appends one answer and reloads the survey table.
pub fn run_survey(context: &DashboardContext, response: SurveyResponse) -> Result<SurveyReport> {
    let span = info_span!("survey", data_dir = %context.data_dir.display());
    let _guard = span.enter();

    let mut collector = SurveyCollector::new(context.row_repository());
    let written_to = collector.repository().append_path().to_path_buf();
    collector
        .submit(&response)
        .with_context(|| format!("append survey answer to {}", written_to.display()))?;
    info!(path = %written_to.display(), "survey answer saved");

    let table = collector.current();
    Ok(SurveyReport {
        response,
        written_to,
        table,
    })
}

// =============================================================================
// show
// =============================================================================

/// Loads the survey table for display.
pub fn run_show(context: &DashboardContext) -> SourceLoad {
    let span = info_span!("show", data_dir = %context.data_dir.display());
    let _guard = span.enter();
    SurveyCollector::new(context.row_repository()).current()
}

// =============================================================================
// visualize
// =============================================================================

/// User inputs of the visualize command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualizeOptions {
    pub min_value: u32,
    pub query: String,
    pub group_by: GroupBy,
    pub moods: Vec<String>,
    /// Overrides `charts.top_n`.
    pub top: Option<usize>,
}

#[derive(Debug)]
pub struct VisualizeReport {
    pub data: DashboardData,
    /// Choices offered by the mood filter.
    pub mood_options: Vec<String>,
    pub options: VisualizeOptions,
    pub top_rated: ChartData<TopRatedChart>,
    pub values: ChartData<ValueChart>,
    pub energy_lyrics: ChartData<EnergyLyricsChart>,
}

/// Loads both sources and prepares the three charts.
///
/// # Errors
///
/// Only input validation fails; source and chart problems are carried in
/// the report.
pub fn run_visualize(context: &DashboardContext, options: &VisualizeOptions) -> Result<VisualizeReport> {
    let max = context.config.charts.max_min_value;
    if options.min_value > max {
        bail!("--min-value {} is above the configured maximum {max}", options.min_value);
    }
    let top = options.top.unwrap_or(context.config.charts.top_n);

    let span = info_span!("visualize", data_dir = %context.data_dir.display());
    let _guard = span.enter();

    let data = context.pipeline().run();
    let rows = data.rows.outcome.frame();
    let records = data.records.outcome.frame();

    let top_rated = prepare_top_rated(records, top);
    let values = prepare_value_chart(
        rows,
        &ValueFilter {
            min_value: f64::from(options.min_value),
            category_query: options.query.clone(),
        },
    );
    let energy_lyrics = prepare_energy_lyrics(
        records,
        &EnergyLyricsOptions {
            group_by: options.group_by,
            moods: options.moods.clone(),
        },
    );
    let mood_options = records.map(mood_options).unwrap_or_default();

    info!(
        top_rated = top_rated.is_ready(),
        values = values.is_ready(),
        energy_lyrics = energy_lyrics.is_ready(),
        "charts prepared"
    );

    Ok(VisualizeReport {
        data,
        mood_options,
        options: options.clone(),
        top_rated,
        values,
        energy_lyrics,
    })
}
