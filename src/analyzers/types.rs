//! Data types produced by the aggregation pipeline.

use std::fmt;

use chrono::Weekday;
use serde::{Serialize, Serializer};

use crate::config::{month_name, weekday_name};

/// The four statistic groups, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Time,
    Station,
    Duration,
    User,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Time,
        Category::Station,
        Category::Duration,
        Category::User,
    ];

    /// Section heading.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Time => "Most Frequent Times of Travel",
            Category::Station => "Most Popular Stations and Trip",
            Category::Duration => "Trip Duration Stats",
            Category::User => "User Stats",
        }
    }

    /// Short noun used in "no data" messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Category::Time => "time",
            Category::Station => "station",
            Category::Duration => "trip duration",
            Category::User => "user",
        }
    }
}

/// Result of one statistic group. `NoData` when the filtered dataset is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "stats", rename_all = "snake_case")]
pub enum Section<T> {
    NoData,
    Ready(T),
}

impl<T> Section<T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Section::NoData)
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Section::Ready(v) => Some(v),
            Section::NoData => None,
        }
    }
}

/// Statistic that depends on a column only some cities publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Availability<T> {
    NotAvailable,
    Available(T),
}

impl<T> Availability<T> {
    pub fn as_available(&self) -> Option<&T> {
        match self {
            Availability::Available(v) => Some(v),
            Availability::NotAvailable => None,
        }
    }
}

/// A total duration split as hours / minutes / seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoursMinutesSeconds {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl HoursMinutesSeconds {
    pub fn from_seconds(total: u64) -> Self {
        HoursMinutesSeconds {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for HoursMinutesSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hours, {} minutes, {} seconds",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// A duration split as minutes / seconds; minutes are not capped at 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinutesSeconds {
    pub minutes: u64,
    pub seconds: u64,
}

impl MinutesSeconds {
    pub fn from_seconds(total: u64) -> Self {
        MinutesSeconds {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for MinutesSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes, {} seconds", self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DurationValue {
    Hms(HoursMinutesSeconds),
    Ms(MinutesSeconds),
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationValue::Hms(d) => fmt::Display::fmt(d, f),
            DurationValue::Ms(d) => fmt::Display::fmt(d, f),
        }
    }
}

/// Value cell of a report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Text(String),
    Integer(i64),
    Duration(DurationValue),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Text(s) => f.write_str(s),
            StatValue::Integer(n) => write!(f, "{n}"),
            StatValue::Duration(d) => fmt::Display::fmt(d, f),
        }
    }
}

/// A labelled report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub label: String,
    pub value: StatValue,
}

impl Stat {
    pub fn new(label: impl Into<String>, value: StatValue) -> Self {
        Stat {
            label: label.into(),
            value,
        }
    }

    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, StatValue::Text(value.into()))
    }

    pub fn integer(label: impl Into<String>, value: impl Into<i64>) -> Self {
        Self::new(label, StatValue::Integer(value.into()))
    }
}

/// Flattens a typed statistic group into labelled rows.
pub trait Tabulate {
    fn rows(&self) -> Vec<Stat>;
}

/// Most frequent month, weekday and start hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub popular_month: u32,
    #[serde(serialize_with = "serialize_weekday")]
    pub popular_day: Weekday,
    pub popular_hour: u32,
}

impl TimeStats {
    /// `January`
    pub fn month_label(&self) -> &'static str {
        month_name(self.popular_month)
    }

    /// `Monday`
    pub fn day_label(&self) -> String {
        title_case(weekday_name(self.popular_day))
    }

    /// `9:00`, 24-hour, no leading zero.
    pub fn hour_label(&self) -> String {
        format!("{}:00", self.popular_hour)
    }
}

impl Tabulate for TimeStats {
    fn rows(&self) -> Vec<Stat> {
        vec![
            Stat::text("Most Popular Month", self.month_label()),
            Stat::text("Most Popular Day", self.day_label()),
            Stat::text("Most Popular Start Hour", self.hour_label()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub popular_start_station: String,
    pub popular_end_station: String,
    /// (start, end) of the most frequent trip
    pub popular_trip: (String, String),
}

impl StationStats {
    pub fn trip_label(&self) -> String {
        format!("{} → {}", self.popular_trip.0, self.popular_trip.1)
    }
}

impl Tabulate for StationStats {
    fn rows(&self) -> Vec<Stat> {
        vec![
            Stat::text("Most Popular Start Station", &self.popular_start_station),
            Stat::text("Most Popular End Station", &self.popular_end_station),
            Stat::text("Most Frequent Trip", self.trip_label()),
        ]
    }
}

/// Total and mean trip duration in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationStats {
    pub total_seconds: u64,
    /// Truncated toward zero
    pub average_seconds: u64,
}

impl DurationStats {
    pub fn total(&self) -> HoursMinutesSeconds {
        HoursMinutesSeconds::from_seconds(self.total_seconds)
    }

    pub fn average(&self) -> MinutesSeconds {
        MinutesSeconds::from_seconds(self.average_seconds)
    }
}

impl Tabulate for DurationStats {
    fn rows(&self) -> Vec<Stat> {
        vec![
            Stat::new(
                "Total Trip Duration",
                StatValue::Duration(DurationValue::Hms(self.total())),
            ),
            Stat::new(
                "Average Trip Duration",
                StatValue::Duration(DurationValue::Ms(self.average())),
            ),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

impl Tabulate for BirthYearStats {
    fn rows(&self) -> Vec<Stat> {
        vec![
            Stat::integer("Earliest Birth Year", self.earliest),
            Stat::integer("Most Recent Birth Year", self.most_recent),
            Stat::integer("Most Common Birth Year", self.most_common),
        ]
    }
}

/// Counts of a categorical column, highest first.
pub type Distribution = Vec<(String, u64)>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Distribution,
    pub gender: Availability<Distribution>,
    pub birth_years: Availability<BirthYearStats>,
}

impl Tabulate for UserStats {
    fn rows(&self) -> Vec<Stat> {
        let mut rows: Vec<Stat> = self
            .user_types
            .iter()
            .map(|(kind, n)| Stat::integer(format!("User Type: {kind}"), count_value(*n)))
            .collect();

        match &self.gender {
            Availability::Available(dist) => rows.extend(
                dist.iter()
                    .map(|(g, n)| Stat::integer(format!("Gender: {g}"), count_value(*n))),
            ),
            Availability::NotAvailable => rows.push(Stat::text("Gender", NOT_AVAILABLE)),
        }

        match &self.birth_years {
            Availability::Available(years) => rows.extend(years.rows()),
            Availability::NotAvailable => rows.push(Stat::text("Birth Year", NOT_AVAILABLE)),
        }

        rows
    }
}

/// Marker text for optional columns missing from a city's data.
pub const NOT_AVAILABLE: &str = "not available";

fn count_value(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}
