//! CLI argument definitions for the dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dash_model::GroupBy;

#[derive(Parser)]
#[command(
    name = "dash",
    version,
    about = "Survey collector and song dashboard",
    long_about = "Collect free-time survey answers and chart them next to a song ratings file.\n\n\
                  Survey answers are appended to data.csv; song records are read from data.json."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding data.csv and data.json (default: current directory).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Configuration file (default: <DATA_DIR>/dashboard.toml when present).
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Append one survey answer and print the current survey table.
    Survey(SurveyArgs),

    /// Print the current survey table.
    Show,

    /// Print source status, previews, and the three charts.
    Visualize(VisualizeArgs),
}

#[derive(Parser)]
pub struct SurveyArgs {
    /// What you do in your free time.
    #[arg(long = "category", value_name = "TEXT")]
    pub category: String,

    /// Hours per week.
    #[arg(long = "value", value_name = "TEXT")]
    pub value: String,
}

#[derive(Parser)]
pub struct VisualizeArgs {
    /// Hide survey answers below this value.
    #[arg(
        long = "min-value",
        value_name = "N",
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..=100)
    )]
    pub min_value: u32,

    /// Only show categories containing this text (case-insensitive).
    #[arg(long = "query", value_name = "TEXT", default_value = "")]
    pub query: String,

    /// Group the energy/lyrics summary by this field.
    #[arg(long = "group-by", value_enum, default_value = "artist")]
    pub group_by: GroupByArg,

    /// Only include songs with this mood (repeatable).
    #[arg(long = "mood", value_name = "MOOD")]
    pub moods: Vec<String>,

    /// Number of songs in the top ratings chart (default from config).
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,
}

/// CLI group-by choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum GroupByArg {
    Artist,
    Genre,
}

impl From<GroupByArg> for GroupBy {
    fn from(value: GroupByArg) -> Self {
        match value {
            GroupByArg::Artist => GroupBy::Artist,
            GroupByArg::Genre => GroupBy::Genre,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
