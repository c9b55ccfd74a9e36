//! Derives month, weekday and hour from a trip's start timestamp.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::Result;
use crate::config::weekday_name;
use crate::error::BikeshareError;

/// Accepted `Start Time` / `End Time` layouts, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Fields derived from a start timestamp. Naive local time, no zone conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    /// Calendar month, 1-12
    pub month: u32,
    pub day_of_week: Weekday,
    /// Hour of day, 0-23
    pub hour: u32,
}

impl TimeParts {
    pub fn from_timestamp(ts: &NaiveDateTime) -> Self {
        TimeParts {
            month: ts.month(),
            day_of_week: ts.weekday(),
            hour: ts.hour(),
        }
    }

    /// Lowercase weekday name (`monday`).
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }
}

/// Parses a `Start Time` or `End Time` cell.
///
/// `row` is the 1-based data row, carried into the error for reporting.
pub fn parse_timestamp(value: &str, row: usize) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| BikeshareError::MalformedTimestamp {
            row,
            value: value.to_string(),
        })
}
