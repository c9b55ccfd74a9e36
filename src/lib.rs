pub mod analyzers;
pub mod config;
pub mod dataset;
pub mod decorate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod paginate;
pub mod prompt;
pub mod session;

pub use analyzers::report::StatReport;
pub use config::{City, Settings};
pub use dataset::{Dataset, OptionalField, Schema, TripRecord};
pub use error::BikeshareError;
pub use filter::{DayFilter, FilterSpec, Month, MonthFilter};
pub use paginate::{Page, PageCursor, next_page};

/// Result type for bikeshare_explorer operations
pub type Result<T> = std::result::Result<T, BikeshareError>;
