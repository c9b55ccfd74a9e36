//! Error types for bikeshare_explorer

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or filtering trip data.
///
/// Empty filter results and cities without gender / birth year columns are
/// not errors; they surface as "no data" and "not available" in the report.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A `Start Time` or `End Time` cell could not be parsed
    #[error("malformed timestamp '{value}' on data row {row}")]
    MalformedTimestamp { row: usize, value: String },

    /// A `Trip Duration` cell was negative or not a finite number
    #[error("invalid trip duration '{value}' on data row {row}")]
    InvalidDuration { row: usize, value: String },

    /// A required column is missing from the CSV header
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// City name outside the supported set
    #[error("unknown city '{0}' (expected chicago, new york city or washington)")]
    UnknownCity(String),

    /// Month name outside `all`, `january`..`june`
    #[error("unknown month '{0}' (expected all or january..june)")]
    UnknownMonth(String),

    /// Day name outside `all`, `monday`..`sunday`
    #[error("unknown day '{0}' (expected all or monday..sunday)")]
    UnknownDay(String),

    /// Failed to open a city file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV decoding or encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
