//! In-memory trip table and its per-city schema.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::decorate::TimeParts;
use crate::filter::{self, FilterSpec};

/// Columns that only some cities publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionalField {
    Gender,
    BirthYear,
}

impl OptionalField {
    /// Header name in the city CSV files.
    pub fn column_name(&self) -> &'static str {
        match self {
            OptionalField::Gender => "Gender",
            OptionalField::BirthYear => "Birth Year",
        }
    }
}

/// Optional columns present in a dataset.
///
/// Presence is a property of the file header, not of individual rows: a
/// city with a `Gender` column whose cells are all empty still has the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    present: BTreeSet<OptionalField>,
}

impl Schema {
    pub fn new(fields: impl IntoIterator<Item = OptionalField>) -> Self {
        Schema {
            present: fields.into_iter().collect(),
        }
    }

    pub fn has(&self, field: OptionalField) -> bool {
        self.present.contains(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = OptionalField> + '_ {
        self.present.iter().copied()
    }
}

/// One trip observation with its derived time fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    /// Whole seconds
    pub trip_duration: u64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub time: TimeParts,
}

impl TripRecord {
    /// Builds a record and derives its time fields from `start_time`.
    pub fn new(
        start_time: NaiveDateTime,
        trip_duration: u64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: impl Into<String>,
    ) -> Self {
        TripRecord {
            time: TimeParts::from_timestamp(&start_time),
            start_time,
            end_time: None,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: Some(user_type.into()),
            gender: None,
            birth_year: None,
        }
    }

    pub fn with_end_time(mut self, end_time: NaiveDateTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }
}

/// Ordered trip records for one city. Never mutated after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<TripRecord>,
    schema: Schema,
}

impl Dataset {
    pub fn new(records: Vec<TripRecord>, schema: Schema) -> Self {
        Dataset { records, schema }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Order-preserving subset matching `spec`. See [`filter::apply`].
    pub fn filter(&self, spec: &FilterSpec) -> Dataset {
        filter::apply(self, spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_schema_presence() {
        let schema = Schema::new([OptionalField::BirthYear]);
        assert!(schema.has(OptionalField::BirthYear));
        assert!(!schema.has(OptionalField::Gender));
        assert!(!Schema::default().has(OptionalField::BirthYear));
    }

    #[test]
    fn test_schema_fields_are_ordered() {
        let schema = Schema::new([OptionalField::BirthYear, OptionalField::Gender]);
        let fields: Vec<_> = schema.fields().map(|f| f.column_name()).collect();
        assert_eq!(fields, vec!["Gender", "Birth Year"]);
    }

    #[test]
    fn test_trip_record_derives_time() {
        let start = NaiveDate::from_ymd_opt(2017, 5, 3)
            .unwrap()
            .and_hms_opt(17, 45, 0)
            .unwrap();
        let trip = TripRecord::new(start, 600, "A", "B", "Subscriber")
            .with_end_time(start + chrono::Duration::seconds(600))
            .with_gender("Female")
            .with_birth_year(1988);

        assert_eq!(trip.time.month, 5);
        assert_eq!(trip.time.day_name(), "wednesday");
        assert_eq!(trip.time.hour, 17);
        assert_eq!(
            trip.end_time,
            NaiveDate::from_ymd_opt(2017, 5, 3).unwrap().and_hms_opt(17, 55, 0)
        );
        assert_eq!(trip.gender.as_deref(), Some("Female"));
        assert_eq!(trip.birth_year, Some(1988));
    }
}
