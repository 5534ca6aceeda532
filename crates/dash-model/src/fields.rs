//! Canonical column names for both sources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Column names of the survey row source.
pub mod row_fields {
    pub const CATEGORY: &str = "Category";
    pub const VALUE: &str = "Value";

    /// Header written when a deployment opts in to headed row files.
    pub const HEADER: [&str; 2] = [CATEGORY, VALUE];
}

/// Field names of the song record source.
pub mod record_fields {
    pub const SONG: &str = "Song";
    pub const ARTIST: &str = "Artist";
    pub const GENRE: &str = "Genre";
    pub const MOOD_FIT: &str = "Mood Fit";
    pub const ENERGY_LEVEL: &str = "Energy Level";
    pub const LYRICS_IMPACT: &str = "Lyrics Impact";
    pub const OVERALL_RATING: &str = "Overall Rating";

    /// Name of the object field that may wrap the record array.
    pub const DATA_POINTS: &str = "data_points";

    /// Numeric fields averaged in the group summary.
    pub const SUMMARY_MEASURES: [&str; 3] = [ENERGY_LEVEL, LYRICS_IMPACT, OVERALL_RATING];
}

/// Categorical column used to group the energy/lyrics summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    #[default]
    Artist,
    Genre,
}

impl GroupBy {
    /// The record field this selector groups on.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Artist => record_fields::ARTIST,
            Self::Genre => record_fields::GENRE,
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artist" => Ok(Self::Artist),
            "genre" => Ok(Self::Genre),
            other => Err(format!("unknown group-by column '{other}'")),
        }
    }
}
