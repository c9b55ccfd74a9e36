//! Month / day-of-week selection over a [`Dataset`].

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use crate::config::weekday_name;
use crate::dataset::{Dataset, TripRecord};
use crate::error::BikeshareError;

/// Months covered by the published trip logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// Calendar month number, 1-based.
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl MonthFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonthFilter::All => "all",
            MonthFilter::Only(m) => m.as_str(),
        }
    }

    fn matches(&self, trip: &TripRecord) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => trip.time.month == m.number(),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(MonthFilter::All);
        }
        Month::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .map(MonthFilter::Only)
            .ok_or_else(|| BikeshareError::UnknownMonth(s.to_string()))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayFilter::All => "all",
            DayFilter::Only(d) => weekday_name(*d),
        }
    }

    fn matches(&self, trip: &TripRecord) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => trip.time.day_of_week == *d,
        }
    }
}

// Only full lowercase names are accepted; chrono's own parser also takes
// abbreviations like "mon".
impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(DayFilter::All);
        }
        Self::WEEK
            .into_iter()
            .find(|d| weekday_name(*d) == wanted)
            .map(DayFilter::Only)
            .ok_or_else(|| BikeshareError::UnknownDay(s.to_string()))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A month and day-of-week selection. Either side may be `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSpec {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSpec {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        FilterSpec { month, day }
    }

    /// True when neither month nor day narrows the data.
    pub fn is_unfiltered(&self) -> bool {
        self.month == MonthFilter::All && self.day == DayFilter::All
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.month.matches(trip) && self.day.matches(trip)
    }
}

/// Returns a new dataset holding the records of `dataset` that match `spec`,
/// in their original order. The source is left untouched and an empty result
/// is valid.
pub fn apply(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    let records = if spec.is_unfiltered() {
        dataset.records().to_vec()
    } else {
        dataset
            .records()
            .iter()
            .filter(|t| spec.matches(t))
            .cloned()
            .collect()
    };

    tracing::debug!(
        month = %spec.month,
        day = %spec.day,
        before = dataset.len(),
        after = records.len(),
        "Applied filter"
    );

    Dataset::new(records, dataset.schema().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{OptionalField, Schema};
    use chrono::NaiveDate;

    #[test]
    fn test_month_filter_from_str() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!(
            "March".parse::<MonthFilter>().unwrap(),
            MonthFilter::Only(Month::March)
        );
        assert!("july".parse::<MonthFilter>().is_err());
        assert!("".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_day_filter_from_str_requires_full_name() {
        assert_eq!("all".parse::<DayFilter>().unwrap(), DayFilter::All);
        assert_eq!(
            "sunday".parse::<DayFilter>().unwrap(),
            DayFilter::Only(Weekday::Sun)
        );
        assert!("mon".parse::<DayFilter>().is_err());
    }

    #[test]
    fn test_month_numbers() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::June.number(), 6);
    }

    #[test]
    fn test_all_all_returns_dataset_unchanged() {
        let data = sample();
        let out = apply(&data, &FilterSpec::default());
        assert_eq!(out, data);
    }

    #[test]
    fn test_month_filter_keeps_order() {
        let data = sample();
        let spec = FilterSpec::new(MonthFilter::Only(Month::January), DayFilter::All);
        let out = apply(&data, &spec);

        let stations: Vec<_> = out.records().iter().map(|t| t.start_station.as_str()).collect();
        assert_eq!(stations, vec!["a", "c", "d"]);
        assert_eq!(out.schema(), data.schema());
    }

    #[test]
    fn test_month_and_day_commute() {
        let data = sample();
        let month = FilterSpec::new(MonthFilter::Only(Month::January), DayFilter::All);
        let day = FilterSpec::new(MonthFilter::All, DayFilter::Only(Weekday::Mon));

        let month_then_day = apply(&apply(&data, &month), &day);
        let day_then_month = apply(&apply(&data, &day), &month);
        let combined = apply(
            &data,
            &FilterSpec::new(MonthFilter::Only(Month::January), DayFilter::Only(Weekday::Mon)),
        );

        assert_eq!(month_then_day, day_then_month);
        assert_eq!(month_then_day, combined);
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_filter_to_empty_is_valid() {
        let data = sample();
        let spec = FilterSpec::new(MonthFilter::Only(Month::June), DayFilter::All);
        let out = apply(&data, &spec);

        assert!(out.is_empty());
        assert!(out.schema().has(OptionalField::Gender));
        assert_eq!(data.len(), 5);
    }

    fn trip(y: i32, m: u32, d: u32, station: &str) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        TripRecord::new(start, 60, station, "z", "Subscriber")
    }

    fn sample() -> Dataset {
        // 2017-01-02 and 2017-01-09 are Mondays, 2017-01-03 a Tuesday
        Dataset::new(
            vec![
                trip(2017, 1, 2, "a"),
                trip(2017, 2, 6, "b"),
                trip(2017, 1, 3, "c"),
                trip(2017, 1, 9, "d"),
                trip(2017, 3, 1, "e"),
            ],
            Schema::new([OptionalField::Gender]),
        )
    }
}
