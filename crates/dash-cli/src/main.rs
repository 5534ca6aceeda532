//! Survey and song dashboard CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use dash_cli::commands::{DashboardContext, VisualizeOptions, run_show, run_survey, run_visualize};
use dash_cli::config::load_config;
use dash_cli::logging::{LogConfig, LogFormat, init_logging};
use dash_cli::render::{print_show, print_survey, print_visualize};
use dash_model::SurveyResponse;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!(error = %error, "command failed");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<()> {
    let search_dir = cli.data_dir.clone().unwrap_or_else(|| ".".into());
    let config = load_config(cli.config.as_deref(), &search_dir)?;
    let data_dir = config.resolve_data_dir(cli.data_dir.as_deref());
    let context = DashboardContext::new(data_dir, config);

    match cli.command {
        Command::Survey(args) => {
            let report = run_survey(&context, SurveyResponse::new(args.category, args.value))?;
            print_survey(&report);
        }
        Command::Show => print_show(&run_show(&context)),
        Command::Visualize(args) => {
            let options = VisualizeOptions {
                min_value: args.min_value,
                query: args.query,
                group_by: args.group_by.into(),
                moods: args.moods,
                top: args.top,
            };
            print_visualize(&run_visualize(&context, &options)?);
        }
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
