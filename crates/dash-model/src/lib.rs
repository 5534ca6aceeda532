//! Domain vocabulary for the survey and song dashboard.
//!
//! This crate holds the plain types shared by the ingestion, transform and
//! CLI crates. It performs no I/O.
//!
//! # Module Organization
//!
//! - [`source`]: Which source a result belongs to and how its status is shown
//! - [`survey`]: A single survey submission
//! - [`fields`]: Canonical column names and the group-by selector

pub mod fields;
pub mod source;
pub mod survey;

pub use fields::{GroupBy, record_fields, row_fields};
pub use source::{SourceKind, SourceStatus, StatusLevel};
pub use survey::SurveyResponse;
