//! CLI entry point for the bikeshare explorer.
//!
//! Runs the interactive analysis loop by default, with one-shot subcommands
//! for printing statistics, paging raw rows and exporting a filtered city.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use bikeshare_explorer::loader::load_city;
use bikeshare_explorer::output::{
    export_dataset, export_file_name, render_records, render_report, report_json,
};
use bikeshare_explorer::prompt::Prompter;
use bikeshare_explorer::session::{CsvSource, Session};
use bikeshare_explorer::{
    City, Dataset, DayFilter, FilterSpec, MonthFilter, PageCursor, Settings, StatReport, next_page,
};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bikeshare trip data by month and day of week", long_about = None)]
struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory to write exported CSV files to
    #[arg(long, global = true, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// City and filter selection shared by the one-shot commands.
#[derive(Args)]
struct Selection {
    /// chicago, "new york city" or washington
    #[arg(short, long)]
    city: City,

    /// all, or january through june
    #[arg(short, long, default_value = "all")]
    month: MonthFilter,

    /// all, or monday through sunday
    #[arg(short, long, default_value = "all")]
    day: DayFilter,
}

impl Selection {
    fn spec(&self) -> FilterSpec {
        FilterSpec::new(self.month, self.day)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive prompt loop (default)
    Explore,
    /// Print the four statistic groups for a selection
    Stats {
        #[command(flatten)]
        selection: Selection,

        /// Emit the report as JSON instead of tables
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print one page of raw rows
    Raw {
        #[command(flatten)]
        selection: Selection,

        /// Row offset of the page
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },
    /// Save the filtered rows to a CSV file
    Export {
        #[command(flatten)]
        selection: Selection,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let settings = Settings::from_env()
        .with_data_dir(cli.data_dir)
        .with_export_dir(cli.export_dir);

    let command = cli.command.unwrap_or(Commands::Explore);
    // Keep the terminal quiet while prompting
    let stderr_default = match command {
        Commands::Explore => LevelFilter::WARN,
        _ => LevelFilter::INFO,
    };
    let _file_guard = init_logging(&settings.log_file_path, stderr_default)?;

    match command {
        Commands::Explore => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            let mut session = Session::new(CsvSource::new(settings.clone()), settings);
            session.run(&mut prompter)?;
        }
        Commands::Stats { selection, json } => {
            let filtered = load_selection(&settings, &selection)?;

            let started = Instant::now();
            let report = StatReport::compute(&filtered);
            if json {
                println!("{}", report_json(&report)?);
            } else {
                print!("{}", render_report(&report, started.elapsed()));
            }
        }
        Commands::Raw { selection, offset } => {
            let filtered = load_selection(&settings, &selection)?;

            let page = next_page(filtered.records(), PageCursor::at(offset));
            if page.exhausted {
                println!("No more data to display.");
            } else {
                print!("{}", render_records(page.rows, filtered.schema()));
                info!(next_offset = page.next.offset(), "Page shown");
            }
        }
        Commands::Export { selection } => {
            let filtered = load_selection(&settings, &selection)?;

            let name = export_file_name(selection.city, &selection.spec());
            let path = settings.export_path(&name);
            export_dataset(&path, &filtered)
                .with_context(|| format!("failed to export to {}", path.display()))?;
            println!("Filtered data saved to '{}'.", path.display());
        }
    }

    Ok(())
}

fn load_selection(settings: &Settings, selection: &Selection) -> Result<Dataset> {
    let dataset = load_city(settings, selection.city)
        .with_context(|| format!("failed to load data for {}", selection.city))?;
    Ok(dataset.filter(&selection.spec()))
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// The returned guard must stay alive for the file writer to flush.
fn init_logging(
    log_file_path: &Path,
    stderr_default: LevelFilter,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(layer_filter("RUST_LOG", stderr_default));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(layer_filter("RUST_LOG_JSON", LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

/// Filter for one logging layer: the directives in `env_var` when set,
/// otherwise everything at `default` and above.
fn layer_filter(env_var: &str, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(env_var)
        .from_env_lossy()
}
