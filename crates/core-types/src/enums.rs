use crate::error::CoreError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The reporting window a caller can request for an analytics snapshot.
///
/// The wire representation matches the query-parameter values the dashboard
/// sends (`1d`, `7d`, `30d`, `90d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1d")]
    Day,
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl TimeRange {
    /// Returns the wire representation of this range.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Day => "1d",
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Quarter => "90d",
        }
    }

    /// Parses a query-parameter value, falling back to the default window
    /// for anything unrecognized. The HTTP surface must never reject a
    /// report request over a bad range value.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Derives the inclusive lower bound of the reporting window from `now`.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let days = match self {
            TimeRange::Day => 1,
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
        };
        now - Duration::days(days)
    }
}

impl FromStr for TimeRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(TimeRange::Day),
            "7d" => Ok(TimeRange::Week),
            "30d" => Ok(TimeRange::Month),
            "90d" => Ok(TimeRange::Quarter),
            other => Err(CoreError::InvalidInput(
                "time range".to_string(),
                other.to_string(),
            )),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar season, used by the seasonal demand signal in analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Maps a 1-based calendar month to its season.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    /// The fixed keyword list matched against product tags and categories
    /// when scoring seasonal demand.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Season::Spring => &["light", "fresh", "outdoor", "garden"],
            Season::Summer => &["cool", "beach", "vacation", "outdoor"],
            Season::Fall => &["warm", "cozy", "indoor", "autumn"],
            Season::Winter => &["warm", "cozy", "indoor", "winter"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The area of the store a recommendation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Product,
    Category,
    Pricing,
    Marketing,
}

/// How much a recommendation is expected to move the needle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}
