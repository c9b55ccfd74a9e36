use serde::Serialize;

use crate::analyzers::aggregate::{duration_stats, station_stats, time_stats, user_stats};
use crate::analyzers::types::{
    Category, DurationStats, Section, Stat, StationStats, Tabulate, TimeStats, UserStats,
};
use crate::dataset::Dataset;

/// All four statistic groups for one filtered dataset.
///
/// Built fresh for every selection and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatReport {
    pub record_count: usize,
    pub time: Section<TimeStats>,
    pub station: Section<StationStats>,
    pub duration: Section<DurationStats>,
    pub user: Section<UserStats>,
}

impl StatReport {
    #[tracing::instrument(skip(dataset), fields(records = dataset.len()))]
    pub fn compute(dataset: &Dataset) -> Self {
        if dataset.is_empty() {
            tracing::info!("No records match the selection");
            return StatReport::empty();
        }

        StatReport {
            record_count: dataset.len(),
            time: time_stats(dataset),
            station: station_stats(dataset),
            duration: duration_stats(dataset),
            user: user_stats(dataset),
        }
    }

    fn empty() -> Self {
        StatReport {
            record_count: 0,
            time: Section::NoData,
            station: Section::NoData,
            duration: Section::NoData,
            user: Section::NoData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Labelled rows for `category`, or `NoData`.
    pub fn section(&self, category: Category) -> Section<Vec<Stat>> {
        match category {
            Category::Time => rows_of(&self.time),
            Category::Station => rows_of(&self.station),
            Category::Duration => rows_of(&self.duration),
            Category::User => rows_of(&self.user),
        }
    }

    /// The report as an ordered category → rows mapping.
    pub fn sections(&self) -> Vec<(Category, Section<Vec<Stat>>)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.section(c)))
            .collect()
    }
}

fn rows_of<T: Tabulate>(section: &Section<T>) -> Section<Vec<Stat>> {
    match section {
        Section::Ready(stats) => Section::Ready(stats.rows()),
        Section::NoData => Section::NoData,
    }
}
