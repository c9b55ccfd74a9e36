//! CSV loader for per-city trip logs.
//!
//! Reads the published bikeshare files (`Start Time`, `End Time`,
//! `Trip Duration`, `Start Station`, `End Station`, `User Type`, and for some
//! cities `Gender` and `Birth Year`) into a decorated [`Dataset`]. Any other
//! columns, such as the unnamed index column, are ignored.

use std::fs::File;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::Result;
use crate::config::{City, Settings};
use crate::dataset::{Dataset, OptionalField, Schema, TripRecord};
use crate::decorate::{TimeParts, parse_timestamp};
use crate::error::BikeshareError;

const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

/// A single CSV row before validation and decoration.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    // Some cities write durations as floats ("1039.0")
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

impl RawTrip {
    /// Validates and decorates the row. `row` is 1-based.
    fn into_record(self, row: usize) -> Result<TripRecord> {
        let start_time = parse_timestamp(&self.start_time, row)?;
        let end_time = non_blank(self.end_time)
            .map(|value| parse_timestamp(&value, row))
            .transpose()?;

        if !self.trip_duration.is_finite() || self.trip_duration < 0.0 {
            return Err(BikeshareError::InvalidDuration {
                row,
                value: self.trip_duration.to_string(),
            });
        }

        Ok(TripRecord {
            time: TimeParts::from_timestamp(&start_time),
            start_time,
            end_time,
            trip_duration: self.trip_duration.trunc() as u64,
            start_station: self.start_station,
            end_station: self.end_station,
            user_type: non_blank(self.user_type),
            gender: non_blank(self.gender),
            birth_year: self
                .birth_year
                .filter(|y| y.is_finite())
                .map(|y| y.trunc() as i32),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Determines which optional columns the header carries, failing on a
/// missing required column.
fn schema_from_headers(headers: &StringRecord) -> Result<Schema> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    if let Some(missing) = REQUIRED_COLUMNS.into_iter().find(|c| !has(*c)) {
        return Err(BikeshareError::MissingColumn(missing));
    }

    Ok(Schema::new(
        [OptionalField::Gender, OptionalField::BirthYear]
            .into_iter()
            .filter(|f| has(f.column_name())),
    ))
}

/// Reads trips from any CSV source with a header row.
///
/// # Errors
///
/// Fails on the first row whose start time or duration cannot be used; no
/// partial dataset is returned.
pub fn read_trips<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);

    let schema = schema_from_headers(rdr.headers()?)?;
    let mut records = Vec::new();

    for (i, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let raw = result?;
        records.push(raw.into_record(i + 1)?);
    }

    Ok(Dataset::new(records, schema))
}

/// Loads and decorates the trip log for `city` from the configured data directory.
#[tracing::instrument(skip(settings), fields(city = %city))]
pub fn load_city(settings: &Settings, city: City) -> Result<Dataset> {
    let path = settings.city_path(city);
    debug!(path = %path.display(), "Opening city file");

    let file = File::open(&path).map_err(|source| BikeshareError::FileRead {
        path: path.clone(),
        source,
    })?;
    let dataset = read_trips(file)?;

    info!(
        records = dataset.len(),
        gender = dataset.schema().has(OptionalField::Gender),
        birth_year = dataset.schema().has(OptionalField::BirthYear),
        "City data loaded"
    );

    Ok(dataset)
}
