//! Chart preparation.
//!
//! Each chart turns an optional source table plus user inputs into a
//! [`ChartData`]. Missing sources, missing columns and transform errors all
//! end up as [`ChartData::Unavailable`]; a chart never fails the request.

use dash_model::{GroupBy, record_fields};
use polars::prelude::DataFrame;

use crate::aggregate::{group_means, top_n};
use crate::error::Result;
use crate::filter::{distinct_values, drop_missing, filter_at_least, filter_contains, filter_in};
use crate::numeric::coerce_numeric_columns;
use crate::schema::{CategoryValueBinding, bind_category_value, has_columns, missing_columns};

/// Number of songs in the top ratings chart.
pub const TOP_RATED_LIMIT: usize = 10;

pub const RECORDS_UNAVAILABLE: &str = "JSON data not available or missing required columns.";
pub const ROWS_UNAVAILABLE: &str = "CSV data not available. Add data from the Survey page.";
pub const NO_MATCHING_ROWS: &str = "No data matches the current filters.";
pub const NO_POINTS: &str = "No data points to display for the current filters.";
pub const NO_RATINGS: &str = "No ratings to display.";

const TOP_RATED_COLUMNS: [&str; 2] = [record_fields::SONG, record_fields::OVERALL_RATING];

const ENERGY_LYRICS_COLUMNS: [&str; 5] = [
    record_fields::ARTIST,
    record_fields::GENRE,
    record_fields::MOOD_FIT,
    record_fields::ENERGY_LEVEL,
    record_fields::LYRICS_IMPACT,
];

/// Prepared chart or the reason there is none.
#[derive(Debug, Clone)]
pub enum ChartData<T> {
    Ready(T),
    /// Source absent, failed, or missing required columns.
    Unavailable(String),
    /// Filters removed every row.
    Empty(String),
}

impl<T> ChartData<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(chart) => Some(chart),
            _ => None,
        }
    }

    /// Informational message for charts that are not ready.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable(message) | Self::Empty(message) => Some(message),
        }
    }

    fn from_transform(chart: &str, result: Result<Self>, unavailable: &str) -> Self {
        result.unwrap_or_else(|err| {
            tracing::warn!(chart, error = %err, "chart preparation failed");
            Self::Unavailable(unavailable.to_string())
        })
    }
}

/// Song and rating of the highest rated songs, best first.
#[derive(Debug, Clone)]
pub struct TopRatedChart {
    pub table: DataFrame,
}

/// Inputs of the survey values chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFilter {
    /// Rows below this value are hidden.
    pub min_value: f64,
    /// Case-insensitive substring of the category; empty shows all.
    pub category_query: String,
}

impl Default for ValueFilter {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            category_query: String::new(),
        }
    }
}

/// Filtered survey rows with the columns they are plotted from.
#[derive(Debug, Clone)]
pub struct ValueChart {
    pub binding: CategoryValueBinding,
    pub table: DataFrame,
}

/// Inputs of the energy vs lyrics chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnergyLyricsOptions {
    pub group_by: GroupBy,
    /// Moods to keep; empty keeps all.
    pub moods: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EnergyLyricsChart {
    pub group_by: GroupBy,
    /// Filtered records with numeric energy and lyrics columns.
    pub points: DataFrame,
    /// Group means, best rated first.
    pub summary: DataFrame,
}

/// Top `limit` songs by overall rating.
pub fn prepare_top_rated(records: Option<&DataFrame>, limit: usize) -> ChartData<TopRatedChart> {
    let Some(df) = records.filter(|df| has_columns(df, &TOP_RATED_COLUMNS)) else {
        return ChartData::Unavailable(RECORDS_UNAVAILABLE.to_string());
    };

    let result = top_n(df, record_fields::SONG, record_fields::OVERALL_RATING, limit).map(|table| {
        if table.height() == 0 {
            ChartData::Empty(NO_RATINGS.to_string())
        } else {
            ChartData::Ready(TopRatedChart { table })
        }
    });
    ChartData::from_transform("top_rated", result, RECORDS_UNAVAILABLE)
}

/// Survey values filtered by category text and minimum value.
pub fn prepare_value_chart(rows: Option<&DataFrame>, filter: &ValueFilter) -> ChartData<ValueChart> {
    let Some(df) = rows.filter(|df| df.height() > 0) else {
        return ChartData::Unavailable(ROWS_UNAVAILABLE.to_string());
    };
    let Some(binding) = bind_category_value(df) else {
        return ChartData::Unavailable(ROWS_UNAVAILABLE.to_string());
    };

    let category = binding.category.as_str();
    let value = binding.value.as_str();
    let filtered = || -> Result<DataFrame> {
        let table = coerce_numeric_columns(df, &[value])?;
        let table = drop_missing(&table, &[value])?;
        let table = filter_contains(&table, category, &filter.category_query)?;
        filter_at_least(&table, value, filter.min_value)
    };

    let result = filtered().map(|table| {
        tracing::debug!(
            min_value = filter.min_value,
            query = %filter.category_query,
            rows = table.height(),
            "filtered survey values"
        );
        if table.height() == 0 {
            ChartData::Empty(NO_MATCHING_ROWS.to_string())
        } else {
            ChartData::Ready(ValueChart {
                binding: binding.clone(),
                table,
            })
        }
    });
    ChartData::from_transform("values", result, ROWS_UNAVAILABLE)
}

/// Energy vs lyrics scatter points and per-group averages.
pub fn prepare_energy_lyrics(
    records: Option<&DataFrame>,
    options: &EnergyLyricsOptions,
) -> ChartData<EnergyLyricsChart> {
    let Some(df) = records else {
        return ChartData::Unavailable(RECORDS_UNAVAILABLE.to_string());
    };
    let missing = missing_columns(df, &ENERGY_LYRICS_COLUMNS);
    if !missing.is_empty() {
        tracing::info!(missing = ?missing, "energy/lyrics chart columns missing");
        return ChartData::Unavailable(RECORDS_UNAVAILABLE.to_string());
    }

    let measures: Vec<&str> = record_fields::SUMMARY_MEASURES
        .into_iter()
        .filter(|name| df.column(name).is_ok())
        .collect();
    let sort_column = if measures.contains(&record_fields::OVERALL_RATING) {
        record_fields::OVERALL_RATING
    } else {
        record_fields::ENERGY_LEVEL
    };

    let prepared = || -> Result<Option<EnergyLyricsChart>> {
        let points = filter_in(df, record_fields::MOOD_FIT, &options.moods)?;
        let points = coerce_numeric_columns(&points, &measures)?;
        let points = drop_missing(
            &points,
            &[record_fields::ENERGY_LEVEL, record_fields::LYRICS_IMPACT],
        )?;
        if points.height() == 0 {
            return Ok(None);
        }
        let summary = group_means(&points, options.group_by.column(), &measures, sort_column)?;
        Ok(Some(EnergyLyricsChart {
            group_by: options.group_by,
            points,
            summary,
        }))
    };

    let result = prepared().map(|chart| match chart {
        Some(chart) => ChartData::Ready(chart),
        None => ChartData::Empty(NO_POINTS.to_string()),
    });
    ChartData::from_transform("energy_lyrics", result, RECORDS_UNAVAILABLE)
}

/// Sorted distinct moods offered by the mood filter.
pub fn mood_options(records: &DataFrame) -> Vec<String> {
    distinct_values(records, record_fields::MOOD_FIT).unwrap_or_default()
}
