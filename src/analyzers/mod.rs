//! Trip statistics over a filtered dataset.
//!
//! Each of the four statistic groups (travel times, stations, durations,
//! users) is computed independently and yields [`types::Section::NoData`]
//! for an empty selection. Ties in "most frequent" values always go to the
//! value seen first in dataset order.

pub mod aggregate;
pub mod report;
pub mod types;
pub mod utility;
