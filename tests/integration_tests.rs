use std::path::PathBuf;

use bikeshare_explorer::analyzers::types::{Availability, Category, Section};
use bikeshare_explorer::loader::{load_city, read_trips};
use bikeshare_explorer::output::{export_dataset, render_report};
use bikeshare_explorer::{
    City, DayFilter, FilterSpec, Month, MonthFilter, OptionalField, PageCursor, Settings,
    StatReport, next_page,
};
use chrono::Weekday;

fn fixture_settings() -> Settings {
    Settings {
        data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"),
        ..Settings::default()
    }
}

#[test]
fn test_full_pipeline_chicago() {
    let data = load_city(&fixture_settings(), City::Chicago).expect("Failed to load fixture");
    assert_eq!(data.len(), 7);

    let report = StatReport::compute(&data.filter(&FilterSpec::default()));

    let time = report.time.as_ready().unwrap();
    assert_eq!(time.month_label(), "January");
    assert_eq!(time.day_label(), "Monday");
    assert_eq!(time.hour_label(), "8:00");

    let station = report.station.as_ready().unwrap();
    assert_eq!(station.popular_start_station, "Clark St & Elm St");
    assert_eq!(station.popular_end_station, "Canal St & Adams St");
    // three pairs occur twice each; the earliest wins
    assert_eq!(
        station.trip_label(),
        "Clark St & Elm St → Canal St & Adams St"
    );

    let duration = report.duration.as_ready().unwrap();
    assert_eq!(duration.total().to_string(), "1 hours, 1 minutes, 1 seconds");
    assert_eq!(duration.average().to_string(), "8 minutes, 43 seconds");

    let user = report.user.as_ready().unwrap();
    assert_eq!(
        user.user_types,
        vec![("Subscriber".to_string(), 5), ("Customer".to_string(), 2)]
    );
    assert_eq!(
        user.gender.as_available().unwrap(),
        &vec![("Male".to_string(), 3), ("Female".to_string(), 2)]
    );
    let years = user.birth_years.as_available().unwrap();
    assert_eq!(
        (years.earliest, years.most_recent, years.most_common),
        (1978, 2000, 1990)
    );
}

#[test]
fn test_filtered_selection_chicago() {
    let data = load_city(&fixture_settings(), City::Chicago).unwrap();

    let spec = FilterSpec::new(
        MonthFilter::Only(Month::January),
        DayFilter::Only(Weekday::Mon),
    );
    let filtered = data.filter(&spec);
    assert_eq!(filtered.len(), 2);
    assert_eq!(data.len(), 7);

    let report = StatReport::compute(&filtered);
    assert_eq!(report.duration.as_ready().unwrap().total_seconds, 1800);
}

#[test]
fn test_empty_selection_has_no_data() {
    let data = load_city(&fixture_settings(), City::Chicago).unwrap();
    let spec = FilterSpec::new(
        MonthFilter::Only(Month::March),
        DayFilter::Only(Weekday::Mon),
    );
    let filtered = data.filter(&spec);
    assert!(filtered.is_empty());

    let report = StatReport::compute(&filtered);
    for (_, section) in report.sections() {
        assert!(matches!(section, Section::NoData));
    }

    let rendered = render_report(&report, std::time::Duration::ZERO);
    for category in Category::ALL {
        assert!(rendered.contains(category.title()));
    }
    assert!(next_page(filtered.records(), PageCursor::default()).exhausted);
}

#[test]
fn test_city_without_optional_columns() {
    let data = load_city(&fixture_settings(), City::Washington).unwrap();
    assert!(!data.schema().has(OptionalField::Gender));

    let report = StatReport::compute(&data);
    let user = report.user.as_ready().unwrap();
    assert_eq!(user.gender, Availability::NotAvailable);
    assert_eq!(user.birth_years, Availability::NotAvailable);

    let time = report.time.as_ready().unwrap();
    assert_eq!(time.month_label(), "June");

    let duration = report.duration.as_ready().unwrap();
    assert_eq!(duration.total().to_string(), "0 hours, 25 minutes, 28 seconds");
    assert_eq!(duration.average().to_string(), "8 minutes, 29 seconds");
}

#[test]
fn test_paging_through_city() {
    let data = load_city(&fixture_settings(), City::Chicago).unwrap();

    let first = next_page(data.records(), PageCursor::default());
    assert_eq!(first.rows.len(), 5);
    assert!(!first.exhausted);

    let second = next_page(data.records(), first.next);
    assert_eq!(second.rows.len(), 2);
    assert!(!second.exhausted);

    let third = next_page(data.records(), second.next);
    assert!(third.rows.is_empty());
    assert!(third.exhausted);
}

#[test]
fn test_export_preserves_selection() {
    let data = load_city(&fixture_settings(), City::Chicago).unwrap();
    let filtered = data.filter(&FilterSpec::new(MonthFilter::All, DayFilter::Only(Weekday::Mon)));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chicago_all_monday_bikeshare_data.csv");
    export_dataset(&path, &filtered).unwrap();

    let reread = read_trips(std::fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(reread, filtered);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("Start Time,End Time,Trip Duration,"));
    assert!(content.contains("2017-01-02 08:20:00.125"));
}
