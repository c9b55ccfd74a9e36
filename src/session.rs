//! The interactive analysis loop.
//!
//! Each round asks for a city and filters, optionally exports the selection,
//! prints the four statistic groups, then pages through raw rows on request.
//! City datasets are loaded once per process and reused across rounds.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::{info, instrument};

use crate::Result;
use crate::analyzers::report::StatReport;
use crate::config::{City, Settings};
use crate::dataset::Dataset;
use crate::filter::FilterSpec;
use crate::loader::load_city;
use crate::output::{RULE, export_dataset, export_file_name, render_records, render_report};
use crate::paginate::{PageCursor, next_page};
use crate::prompt::Prompter;

/// Provides the full trip dataset for a city.
pub trait TripSource {
    fn load(&self, city: City) -> Result<Dataset>;
}

/// Reads city CSV files from the configured data directory.
pub struct CsvSource {
    settings: Settings,
}

impl CsvSource {
    pub fn new(settings: Settings) -> Self {
        CsvSource { settings }
    }
}

impl TripSource for CsvSource {
    fn load(&self, city: City) -> Result<Dataset> {
        load_city(&self.settings, city)
    }
}

pub struct Session<S> {
    source: S,
    settings: Settings,
    cache: HashMap<City, Dataset>,
}

impl<S: TripSource> Session<S> {
    pub fn new(source: S, settings: Settings) -> Self {
        Session {
            source,
            settings,
            cache: HashMap::new(),
        }
    }

    /// Returns the dataset for `city`, loading it on first use.
    pub fn dataset(&mut self, city: City) -> Result<&Dataset> {
        if !self.cache.contains_key(&city) {
            let dataset = self.source.load(city)?;
            self.cache.insert(city, dataset);
        }
        Ok(&self.cache[&city])
    }

    /// Runs rounds until the user declines to restart or input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, prompter: &mut Prompter<R, W>) -> Result<()> {
        loop {
            let Some((city, spec)) = prompter.ask_filters()? else {
                break;
            };
            self.round(prompter, city, spec)?;

            if !prompter.ask_restart()? {
                break;
            }
        }
        Ok(())
    }

    #[instrument(
        skip(self, prompter, city, spec),
        fields(city = %city, month = %spec.month, day = %spec.day)
    )]
    fn round<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
        city: City,
        spec: FilterSpec,
    ) -> Result<()> {
        let filtered = self.dataset(city)?.filter(&spec);
        info!(records = filtered.len(), "Selection ready");

        if prompter.ask_save()? {
            let name = export_file_name(city, &spec);
            export_dataset(&self.settings.export_path(&name), &filtered)?;
            prompter.say(&format!(
                "\nFiltered data saved to '{name}'. You can now use this file in Tableau or other tools."
            ))?;
            prompter.say(RULE)?;
        }

        let started = Instant::now();
        let report = StatReport::compute(&filtered);
        prompter.show(&render_report(&report, started.elapsed()))?;

        show_raw_rows(prompter, &filtered)
    }
}

/// Shows five rows per "yes" until the user says no or the rows run out.
fn show_raw_rows<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    dataset: &Dataset,
) -> Result<()> {
    if dataset.is_empty() {
        prompter.say("No raw data to display for the selected filters.")?;
        return prompter.say(RULE);
    }

    let mut cursor = PageCursor::default();
    while prompter.ask_more_rows()? {
        let page = next_page(dataset.records(), cursor);
        if page.exhausted {
            prompter.say("No more data to display.")?;
            break;
        }
        prompter.show(&render_records(page.rows, dataset.schema()))?;
        cursor = page.next;
    }

    prompter.say(RULE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Schema, TripRecord};
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::io::Cursor;

    struct FakeSource {
        loads: Cell<usize>,
        trips: usize,
    }

    impl TripSource for FakeSource {
        fn load(&self, _city: City) -> Result<Dataset> {
            self.loads.set(self.loads.get() + 1);
            let start = NaiveDate::from_ymd_opt(2017, 2, 14)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap();
            let trips = (0..self.trips)
                .map(|i| {
                    TripRecord::new(start, 60, format!("Station {i}"), "Lake St", "Subscriber")
                })
                .collect();
            Ok(Dataset::new(trips, Schema::default()))
        }
    }

    fn session(trips: usize, dir: &std::path::Path) -> Session<FakeSource> {
        let settings = Settings {
            export_dir: dir.to_path_buf(),
            ..Settings::default()
        };
        Session::new(
            FakeSource {
                loads: Cell::new(0),
                trips,
            },
            settings,
        )
    }

    fn run(session: &mut Session<FakeSource>, input: &str) -> String {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        session.run(&mut prompter).unwrap();
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_round_pages_until_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(7, dir.path());
        let out = run(&mut s, "chicago\nall\nall\nno\nyes\nyes\nyes\nno\n");

        assert!(out.contains("Most Popular Month"));
        assert!(out.contains("Station 0"));
        assert!(out.contains("Station 6"));
        assert!(out.contains("No more data to display."));
    }

    #[test]
    fn test_empty_selection_reports_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(3, dir.path());
        let out = run(&mut s, "washington\njune\nall\nno\nno\n");

        assert!(out.contains(
            "No data available for the selected filters to calculate time statistics."
        ));
        assert!(out.contains("No raw data to display for the selected filters."));
    }

    #[test]
    fn test_dataset_is_cached_across_rounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(2, dir.path());
        run(
            &mut s,
            "chicago\nall\nall\nno\nno\nyes\nchicago\nfebruary\ntuesday\nno\nno\nno\n",
        );

        assert_eq!(s.source.loads.get(), 1);
    }

    #[test]
    fn test_save_writes_export_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(2, dir.path());
        let out = run(&mut s, "new york city\nfebruary\nall\nyes\nno\nno\n");

        let path = dir.path().join("new_york_city_february_all_bikeshare_data.csv");
        assert!(path.exists());
        assert!(
            out.contains("Filtered data saved to 'new_york_city_february_all_bikeshare_data.csv'")
        );
    }
}
