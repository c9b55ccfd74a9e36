use crate::analyzers::types::{
    Availability, BirthYearStats, Distribution, DurationStats, Section, StationStats, TimeStats,
    UserStats,
};
use crate::analyzers::utility::{stable_mode, value_counts};
use crate::dataset::{Dataset, OptionalField};

/// Most frequent month, weekday and start hour.
pub fn time_stats(dataset: &Dataset) -> Section<TimeStats> {
    let records = dataset.records();

    let month = stable_mode(records.iter().map(|t| t.time.month));
    let day = stable_mode(records.iter().map(|t| t.time.day_of_week));
    let hour = stable_mode(records.iter().map(|t| t.time.hour));

    match (month, day, hour) {
        (Some(popular_month), Some(popular_day), Some(popular_hour)) => Section::Ready(TimeStats {
            popular_month,
            popular_day,
            popular_hour,
        }),
        _ => Section::NoData,
    }
}

/// Most popular start station, end station and (start, end) trip.
///
/// The three are independent: the top trip need not use the top stations.
pub fn station_stats(dataset: &Dataset) -> Section<StationStats> {
    let records = dataset.records();

    let start = stable_mode(records.iter().map(|t| t.start_station.as_str()));
    let end = stable_mode(records.iter().map(|t| t.end_station.as_str()));
    let trip = stable_mode(
        records
            .iter()
            .map(|t| (t.start_station.as_str(), t.end_station.as_str())),
    );

    match (start, end, trip) {
        (Some(start), Some(end), Some((from, to))) => Section::Ready(StationStats {
            popular_start_station: start.to_string(),
            popular_end_station: end.to_string(),
            popular_trip: (from.to_string(), to.to_string()),
        }),
        _ => Section::NoData,
    }
}

/// Total and truncated average trip duration.
pub fn duration_stats(dataset: &Dataset) -> Section<DurationStats> {
    if dataset.is_empty() {
        return Section::NoData;
    }

    let total_seconds: u64 = dataset.records().iter().map(|t| t.trip_duration).sum();
    let average_seconds = total_seconds / dataset.len() as u64;

    Section::Ready(DurationStats {
        total_seconds,
        average_seconds,
    })
}

/// User type counts, gender distribution and birth year extremes.
///
/// Gender is reported whenever the city publishes the column. Birth years
/// additionally need at least one non-empty cell in the selection.
pub fn user_stats(dataset: &Dataset) -> Section<UserStats> {
    if dataset.is_empty() {
        return Section::NoData;
    }

    let records = dataset.records();
    let schema = dataset.schema();

    let user_types = owned(value_counts(
        records.iter().filter_map(|t| t.user_type.as_deref()),
    ));

    let gender = if schema.has(OptionalField::Gender) {
        Availability::Available(owned(value_counts(
            records.iter().filter_map(|t| t.gender.as_deref()),
        )))
    } else {
        Availability::NotAvailable
    };

    let birth_years = if schema.has(OptionalField::BirthYear) {
        birth_year_stats(records.iter().filter_map(|t| t.birth_year))
    } else {
        Availability::NotAvailable
    };

    Section::Ready(UserStats {
        user_types,
        gender,
        birth_years,
    })
}

fn birth_year_stats(years: impl Iterator<Item = i32> + Clone) -> Availability<BirthYearStats> {
    let earliest = years.clone().min();
    let most_recent = years.clone().max();
    let most_common = stable_mode(years);

    match (earliest, most_recent, most_common) {
        (Some(earliest), Some(most_recent), Some(most_common)) => {
            Availability::Available(BirthYearStats {
                earliest,
                most_recent,
                most_common,
            })
        }
        _ => Availability::NotAvailable,
    }
}

fn owned(counts: Vec<(&str, u64)>) -> Distribution {
    counts
        .into_iter()
        .map(|(value, n)| (value.to_string(), n))
        .collect()
}
