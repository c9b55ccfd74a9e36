//! Output formatting and persistence for trip statistics.
//!
//! Renders report sections and raw pages as markdown-style tables, emits
//! reports as JSON, and exports filtered datasets to CSV.

use std::fs::File;
use std::path::Path;

use console::style;
use csv::WriterBuilder;
use tracing::{debug, info};

use crate::Result;
use crate::analyzers::report::StatReport;
use crate::analyzers::types::{Availability, Category, NOT_AVAILABLE, Section, Tabulate, UserStats};
use crate::config::City;
use crate::dataset::{Dataset, OptionalField, Schema, TripRecord};
use crate::filter::FilterSpec;

/// Horizontal rule printed between sections.
pub const RULE: &str = "--------------------------------------------------";

// %.f prints nothing for whole seconds
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Renders a pipe table with a markdown alignment row.
pub fn render_table(headers: &[&str], align: &[Align], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let alignment = |i: usize| align.get(i).copied().unwrap_or(Align::Left);
    let pad = |text: &str, i: usize| {
        let fill = widths[i].saturating_sub(text.chars().count());
        match alignment(i) {
            Align::Left => format!("{text}{}", " ".repeat(fill)),
            Align::Right => format!("{}{text}", " ".repeat(fill)),
        }
    };

    let mut out = String::new();

    let header: Vec<String> = headers.iter().enumerate().map(|(i, h)| pad(*h, i)).collect();
    out.push_str(&format!("| {} |\n", header.join(" | ")));

    let separator: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| match alignment(i) {
            Align::Left => format!(":{}", "-".repeat(*w + 1)),
            Align::Right => format!("{}:", "-".repeat(*w + 1)),
        })
        .collect();
    out.push_str(&format!("|{}|\n", separator.join("|")));

    for row in rows {
        let cells: Vec<String> = (0..widths.len())
            .map(|i| pad(row.get(i).map(String::as_str).unwrap_or(""), i))
            .collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    out
}

fn heading(text: &str) -> String {
    format!("\n{}\n\n", style(text).bold())
}

/// Message shown for a category with no matching records.
pub fn no_data_message(category: Category) -> String {
    format!(
        "No data available for the selected filters to calculate {} statistics.",
        category.noun()
    )
}

fn not_available_message(field: OptionalField) -> String {
    format!("{} data {} for this city.", field.column_name(), NOT_AVAILABLE)
}

fn stat_table<T: Tabulate>(stats: &T) -> String {
    let rows: Vec<Vec<String>> = stats
        .rows()
        .into_iter()
        .map(|s| vec![s.label, s.value.to_string()])
        .collect();
    render_table(&["Statistic", "Value"], &[Align::Left, Align::Left], &rows)
}

fn distribution_table(header: &str, dist: &[(String, u64)]) -> String {
    let rows: Vec<Vec<String>> = dist
        .iter()
        .map(|(value, n)| vec![value.clone(), n.to_string()])
        .collect();
    render_table(&[header, "Count"], &[Align::Left, Align::Right], &rows)
}

fn render_user(stats: &UserStats) -> String {
    let mut out = String::from("User Types:\n");
    out.push_str(&distribution_table("User Type", &stats.user_types));
    out.push('\n');

    match &stats.gender {
        Availability::Available(dist) => {
            out.push_str("Gender Distribution:\n");
            out.push_str(&distribution_table("Gender", dist));
        }
        Availability::NotAvailable => {
            out.push_str(&not_available_message(OptionalField::Gender));
            out.push('\n');
        }
    }
    out.push('\n');

    match &stats.birth_years {
        Availability::Available(years) => {
            out.push_str("Birth Year Statistics:\n");
            out.push_str(&stat_table(years));
        }
        Availability::NotAvailable => {
            out.push_str(&not_available_message(OptionalField::BirthYear));
            out.push('\n');
        }
    }

    out
}

fn render_body<T>(
    category: Category,
    section: &Section<T>,
    body: impl Fn(&T) -> String,
) -> String {
    match section {
        Section::Ready(stats) => body(stats),
        Section::NoData => format!("{}\n", no_data_message(category)),
    }
}

/// Renders one category of `report` with its heading.
pub fn render_category(report: &StatReport, category: Category) -> String {
    let body = match category {
        Category::Time => render_body(category, &report.time, stat_table),
        Category::Station => render_body(category, &report.station, stat_table),
        Category::Duration => render_body(category, &report.duration, stat_table),
        Category::User => render_body(category, &report.user, render_user),
    };
    format!("{}{}", heading(&format!("{}:", category.title())), body)
}

/// Renders the whole report followed by the time it took to compute.
pub fn render_report(report: &StatReport, elapsed: std::time::Duration) -> String {
    let mut out = String::new();
    for category in Category::ALL {
        out.push_str(&render_category(report, category));
        out.push_str(RULE);
        out.push('\n');
    }
    out.push_str(&format!(
        "\n(Calculated in {:.2} seconds)\n{RULE}\n",
        elapsed.as_secs_f64()
    ));
    out
}

/// Column headers for raw rows of a dataset with `schema`.
pub fn record_headers(schema: &Schema) -> Vec<&'static str> {
    let mut headers = vec![
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    headers.extend(schema.fields().map(|f| f.column_name()));
    headers
}

/// Cell values of `trip` in [`record_headers`] order.
pub fn record_cells(trip: &TripRecord, schema: &Schema) -> Vec<String> {
    let mut cells = vec![
        trip.start_time.format(TIMESTAMP_FORMAT).to_string(),
        trip.end_time
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default(),
        trip.trip_duration.to_string(),
        trip.start_station.clone(),
        trip.end_station.clone(),
        trip.user_type.clone().unwrap_or_default(),
    ];
    for field in schema.fields() {
        cells.push(match field {
            OptionalField::Gender => trip.gender.clone().unwrap_or_default(),
            OptionalField::BirthYear => trip.birth_year.map(|y| y.to_string()).unwrap_or_default(),
        });
    }
    cells
}

/// Renders a page of raw rows.
pub fn render_records(rows: &[TripRecord], schema: &Schema) -> String {
    let headers = record_headers(schema);
    let align: Vec<Align> = headers
        .iter()
        .map(|h| match *h {
            "Trip Duration" | "Birth Year" => Align::Right,
            _ => Align::Left,
        })
        .collect();
    let cells: Vec<Vec<String>> = rows.iter().map(|t| record_cells(t, schema)).collect();
    render_table(&headers, &align, &cells)
}

/// Serializes a report as pretty-printed JSON.
pub fn report_json(report: &StatReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// File name for an export of `city` under `spec`,
/// e.g. `new_york_city_march_all_bikeshare_data.csv`.
pub fn export_file_name(city: City, spec: &FilterSpec) -> String {
    format!(
        "{}_{}_{}_bikeshare_data.csv",
        city.slug(),
        spec.month,
        spec.day
    )
}

/// Writes `dataset` to `path` as CSV, replacing any existing file.
///
/// Rows keep their order. Columns are the ones present in the dataset's
/// schema followed by the derived `month`, `day_of_week` and `hour`.
pub fn export_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    debug!(path = %path.display(), records = dataset.len(), "Exporting CSV");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().from_writer(file);

    let schema = dataset.schema();
    let mut header = record_headers(schema);
    header.extend(["month", "day_of_week", "hour"]);
    writer.write_record(&header)?;

    for trip in dataset.records() {
        let mut row = record_cells(trip, schema);
        row.push(trip.time.month.to_string());
        row.push(trip.time.day_name().to_string());
        row.push(trip.time.hour.to_string());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    info!(path = %path.display(), records = dataset.len(), "Export written");

    Ok(())
}
