//! Terminal output for command reports.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use dash_ingest::{LoadOutcome, SourceLoad};
use dash_model::{SourceStatus, StatusLevel, record_fields};
use dash_transform::{ChartData, any_to_string, column_numbers, column_strings};
use polars::prelude::{AnyValue, DataFrame};

use crate::commands::{SurveyReport, VisualizeReport};

/// Rows shown in source previews.
pub const PREVIEW_ROWS: usize = 10;

const BAR_WIDTH: usize = 40;
const PLOT_WIDTH: usize = 48;
const PLOT_HEIGHT: usize = 12;

// =============================================================================
// Commands
// =============================================================================

pub fn print_survey(report: &SurveyReport) {
    println!("Your data has been submitted!");
    println!(
        "You entered: Category: {}, Value: {}",
        report.response.category, report.response.value
    );
    println!("Saved to: {}", report.written_to.display());
    println!();
    print_show(&report.table);
}

pub fn print_show(table: &SourceLoad) {
    println!("Current Data in CSV");
    match &table.outcome {
        LoadOutcome::Loaded { frame, location } => {
            println!("{location}");
            println!("{}", frame_table(frame, None));
        }
        LoadOutcome::Absent { .. } => {
            println!("The 'data.csv' file is empty or does not exist yet.");
        }
        LoadOutcome::LoadError { .. } => println!("{}", status_line(&table.status())),
    }
}

pub fn print_visualize(report: &VisualizeReport) {
    println!("{}", section("Sources"));
    for status in report.data.statuses() {
        println!("{}", status_line(&status));
    }

    if let Some(frame) = report.data.rows.outcome.frame() {
        println!();
        println!("{}", section("CSV Data"));
        println!("{}", frame_table(frame, Some(PREVIEW_ROWS)));
    }
    if let Some(frame) = report.data.records.outcome.frame() {
        println!();
        println!("{}", section("JSON Data"));
        println!("{}", frame_table(frame, Some(PREVIEW_ROWS)));
    }

    println!();
    println!("{}", section("Graph 1: Top Ratings (JSON Data)"));
    match &report.top_rated {
        ChartData::Ready(chart) => println!(
            "{}",
            bar_chart(&labelled_values(
                &chart.table,
                record_fields::SONG,
                record_fields::OVERALL_RATING
            ))
        ),
        other => print_chart_message(other.message()),
    }

    println!();
    println!("{}", section("Graph 2: CSV Filtered Values (CSV Data)"));
    println!(
        "minimum value: {}  category contains: {:?}",
        report.options.min_value, report.options.query
    );
    match &report.values {
        ChartData::Ready(chart) => println!(
            "{}",
            bar_chart(&labelled_values(
                &chart.table,
                &chart.binding.category,
                &chart.binding.value
            ))
        ),
        other => print_chart_message(other.message()),
    }

    println!();
    println!("{}", section("Graph 3: Energy vs Lyrics Impact (JSON Data)"));
    let moods = if report.options.moods.is_empty() {
        "all".to_string()
    } else {
        report.options.moods.join(", ")
    };
    println!(
        "group by: {}  moods: {moods}  available moods: {}",
        report.options.group_by,
        report.mood_options.join(", ")
    );
    match &report.energy_lyrics {
        ChartData::Ready(chart) => {
            println!(
                "{}",
                scatter_plot(
                    &points(
                        &chart.points,
                        record_fields::ENERGY_LEVEL,
                        record_fields::LYRICS_IMPACT
                    ),
                    PLOT_WIDTH,
                    PLOT_HEIGHT
                )
            );
            println!("Group summary (averages)");
            println!("{}", frame_table(&chart.summary, None));
        }
        other => print_chart_message(other.message()),
    }
}

fn print_chart_message(message: Option<&str>) {
    if let Some(message) = message {
        println!("[info] {message}");
    }
}

// =============================================================================
// Building blocks
// =============================================================================

pub fn status_line(status: &SourceStatus) -> String {
    match status.level {
        StatusLevel::Success | StatusLevel::Info => status.to_string(),
        StatusLevel::Warning | StatusLevel::Error => format!("{status} ({})", status.kind),
    }
}

fn section(title: &str) -> String {
    format!("{title}\n{}", "─".repeat(title.chars().count()))
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

/// Whole numbers without a fraction, others to two decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn format_cell(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Float64(v) if !v.is_nan() => Some(format_number(v)),
        AnyValue::Float32(v) if !v.is_nan() => Some(format_number(f64::from(v))),
        AnyValue::Float64(_) | AnyValue::Float32(_) => None,
        other => any_to_string(other),
    }
}

/// A DataFrame as a table; `limit` caps the rows shown.
pub fn frame_table(df: &DataFrame, limit: Option<usize>) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);

    for (idx, column) in df.get_columns().iter().enumerate() {
        if column.dtype().is_primitive_numeric()
            && let Some(col) = table.column_mut(idx)
        {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let shown = limit.map_or(df.height(), |limit| limit.min(df.height()));
    for row in 0..shown {
        let cells = df
            .get_columns()
            .iter()
            .map(|column| match column.get(row).ok().and_then(format_cell) {
                Some(text) => Cell::new(text),
                None => dim_cell(""),
            })
            .collect::<Vec<_>>();
        table.add_row(cells);
    }
    if shown < df.height() {
        let mut more = vec![dim_cell(format!("... {} more rows", df.height() - shown))];
        more.extend((1..df.width()).map(|_| dim_cell("")));
        table.add_row(more);
    }
    table
}

fn labelled_values(df: &DataFrame, label: &str, value: &str) -> Vec<(String, Option<f64>)> {
    let labels = column_strings(df, label).unwrap_or_default();
    let values = column_numbers(df, value).unwrap_or_default();
    labels
        .into_iter()
        .zip(values)
        .map(|(label, value)| (label.unwrap_or_default(), value))
        .collect()
}

fn points(df: &DataFrame, x: &str, y: &str) -> Vec<(f64, f64)> {
    let xs = column_numbers(df, x).unwrap_or_default();
    let ys = column_numbers(df, y).unwrap_or_default();
    xs.into_iter()
        .zip(ys)
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect()
}

/// Horizontal bars scaled to the largest positive value.
pub fn bar_chart(rows: &[(String, Option<f64>)]) -> String {
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = rows
        .iter()
        .filter_map(|(_, value)| *value)
        .fold(0.0_f64, f64::max);

    rows.iter()
        .map(|(label, value)| {
            let (bar, text) = match value {
                Some(v) => {
                    let len = if max > 0.0 && *v > 0.0 {
                        ((v / max) * BAR_WIDTH as f64).round() as usize
                    } else {
                        0
                    };
                    ("█".repeat(len.max(usize::from(*v > 0.0))), format_number(*v))
                }
                None => (String::new(), "-".to_string()),
            };
            format!("{label:<label_width$} │{bar} {text}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Character scatter plot of `(x, y)` points with axis ranges.
pub fn scatter_plot(points: &[(f64, f64)], width: usize, height: usize) -> String {
    if points.is_empty() || width < 2 || height < 2 {
        return String::new();
    }
    let range = |values: &mut dyn Iterator<Item = f64>| {
        values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
    };
    let (x_min, x_max) = range(&mut points.iter().map(|p| p.0));
    let (y_min, y_max) = range(&mut points.iter().map(|p| p.1));

    let scale = |value: f64, min: f64, max: f64, cells: usize| -> usize {
        if max > min {
            (((value - min) / (max - min)) * (cells - 1) as f64).round() as usize
        } else {
            (cells - 1) / 2
        }
    };

    let mut grid = vec![vec![0_u32; width]; height];
    for &(x, y) in points {
        let col = scale(x, x_min, x_max, width);
        let row = height - 1 - scale(y, y_min, y_max, height);
        grid[row][col] += 1;
    }

    let y_labels = [format_number(y_max), format_number(y_min)];
    let axis_width = y_labels.iter().map(String::len).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(height + 3);
    for (idx, row) in grid.iter().enumerate() {
        let label = match idx {
            0 => y_labels[0].as_str(),
            i if i == height - 1 => y_labels[1].as_str(),
            _ => "",
        };
        let marks: String = row
            .iter()
            .map(|count| match count {
                0 => ' ',
                1 => '•',
                _ => '◆',
            })
            .collect();
        lines.push(format!("{label:>axis_width$} │{marks}"));
    }
    lines.push(format!("{:>axis_width$} └{}", "", "─".repeat(width)));
    let x_lo = format_number(x_min);
    let x_hi = format_number(x_max);
    let gap = width.saturating_sub(x_lo.len() + x_hi.len());
    lines.push(format!("{:>axis_width$}  {x_lo}{}{x_hi}", "", " ".repeat(gap)));
    lines.push(format!(
        "{:>axis_width$}  x: {}  y: {}",
        "",
        record_fields::ENERGY_LEVEL,
        record_fields::LYRICS_IMPACT
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(50.0), "50");
        assert_eq!(format_number(7.5), "7.5");
        assert_eq!(format_number(2.0 / 3.0), "0.67");
        assert_eq!(format_number(10.10), "10.1");
    }

    #[test]
    fn test_bar_chart_scales_to_max() {
        let chart = bar_chart(&[
            ("A".to_string(), Some(9.0)),
            ("Bee".to_string(), Some(4.5)),
            ("C".to_string(), None),
        ]);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH / 2);
        assert!(lines[0].starts_with("A   │"));
        assert!(lines[2].ends_with(" -"));
    }

    #[test]
    fn test_scatter_plot_corners() {
        let plot = scatter_plot(&[(0.0, 0.0), (10.0, 10.0)], 10, 5);
        let lines: Vec<&str> = plot.lines().collect();
        assert!(lines[0].starts_with("10 │"));
        assert!(lines[0].ends_with('•'));
        assert!(lines[4].contains("│•"));
        assert!(plot.contains("Energy Level"));
    }

    #[test]
    fn test_scatter_plot_overlap() {
        let plot = scatter_plot(&[(1.0, 1.0), (1.0, 1.0)], 5, 3);
        assert!(plot.contains('◆'));
        assert!(scatter_plot(&[], 5, 3).is_empty());
    }

    #[test]
    fn test_frame_table_preview_limit() {
        let df = DataFrame::new(vec![
            Series::new("Category".into(), ["a", "b", "c"]).into_column(),
            Series::new("Value".into(), [Some(1.5), None, Some(3.0)]).into_column(),
        ])
        .unwrap();
        let rendered = frame_table(&df, Some(2)).to_string();
        assert!(rendered.contains("Category"));
        assert!(rendered.contains("1.5"));
        assert!(!rendered.contains(" c "));
        assert!(rendered.contains("1 more rows"));
    }
}
