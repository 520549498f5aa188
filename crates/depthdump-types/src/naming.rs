//! UTC date naming for daily output files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date convention used to name a day's output file.
///
/// Names are always derived from the UTC calendar date of the day timestamp,
/// never from local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateNaming {
    /// `YYYY_MM_DD`, e.g. `2021_01_01`.
    #[default]
    Ymd,
    /// `DD_MM_YYYY`, e.g. `01_01_2021`.
    Dmy,
}

impl DateNaming {
    /// Returns the `strftime` pattern for this convention.
    #[must_use]
    pub const fn pattern(&self) -> &'static str {
        match self {
            Self::Ymd => "%Y_%m_%d",
            Self::Dmy => "%d_%m_%Y",
        }
    }

    /// Returns the short name of this convention.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ymd => "ymd",
            Self::Dmy => "dmy",
        }
    }

    /// Formats a UNIX timestamp (seconds) as a file stem.
    ///
    /// Returns `None` if the timestamp is outside chrono's supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use depthdump_types::DateNaming;
    ///
    /// assert_eq!(DateNaming::Ymd.file_stem(1_609_459_200).as_deref(), Some("2021_01_01"));
    /// assert_eq!(DateNaming::Dmy.file_stem(1_609_459_200).as_deref(), Some("01_01_2021"));
    /// ```
    #[must_use]
    pub fn file_stem(&self, timestamp: i64) -> Option<String> {
        DateTime::<Utc>::from_timestamp(timestamp, 0)
            .map(|dt| dt.format(self.pattern()).to_string())
    }
}

impl std::fmt::Display for DateNaming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown naming convention.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown naming convention: {0} (expected ymd or dmy)")]
pub struct DateNamingParseError(String);

impl std::str::FromStr for DateNaming {
    type Err = DateNamingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ymd" | "yyyy_mm_dd" => Ok(Self::Ymd),
            "dmy" | "dd_mm_yyyy" => Ok(Self::Dmy),
            _ => Err(DateNamingParseError(s.to_string())),
        }
    }
}
