//! Dashboard table transforms.
//!
//! Turns loaded source tables into chart-ready data. All functions take a
//! DataFrame by reference and return a new one.
//!
//! # Overview
//!
//! - **Coercion**: convert a column to numbers, with unreadable cells missing
//! - **Filtering**: drop missing, text contains, numeric threshold, set membership
//! - **Aggregation**: per-group means and top-N selection
//! - **Schema**: required-column checks and survey column binding
//! - **Charts**: the three dashboard charts as [`ChartData`]
//!
//! # Example
//!
//! ```ignore
//! use dash_transform::{ValueFilter, prepare_value_chart};
//!
//! let filter = ValueFilter {
//!     min_value: 5.0,
//!     category_query: "gam".to_string(),
//! };
//! match prepare_value_chart(data.rows.outcome.frame(), &filter) {
//!     ChartData::Ready(chart) => render(&chart.table),
//!     other => println!("{}", other.message().unwrap_or_default()),
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Never fail a request**: chart preparation reports problems as messages
//! - **Missing is explicit**: unreadable numbers are missing, never zero

mod aggregate;
mod error;
mod filter;
mod numeric;
mod schema;
mod values;

pub mod charts;

// Error type
pub use error::{Result, TransformError};

// Coercion
pub use numeric::{coerce_numeric, coerce_numeric_columns, is_numeric, parse_numeric};

// Filtering
pub use filter::{distinct_values, drop_missing, filter_at_least, filter_contains, filter_in};

// Aggregation
pub use aggregate::{group_means, top_n};

// Schema negotiation
pub use schema::{
    BindingSource, CategoryValueBinding, bind_category_value, has_columns, missing_columns,
};

// Cell access
pub use values::{any_to_f64, any_to_string, column_missing, column_numbers, column_strings};

// Charts
pub use charts::{
    ChartData, EnergyLyricsChart, EnergyLyricsOptions, TOP_RATED_LIMIT, TopRatedChart,
    ValueChart, ValueFilter, mood_options, prepare_energy_lyrics, prepare_top_rated,
    prepare_value_chart,
};
