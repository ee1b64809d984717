//! Read-only accessor for a weather-station climate dataset.
//!
//! This crate answers a fixed set of queries over a SQLite dataset with two
//! tables, `measurements` (one row per station/date observation) and
//! `stations`. The dataset is opened once, read-only, and every query runs
//! under a deadline.
//!
//! # Queries
//!
//! - Precipitation series since a date (inclusive)
//! - Temperature min/avg/max over a date range (inclusive on both ends)
//! - Station listing and raw station count
//! - Station ranking by observation count, and the most active station
//! - Temperature observations after a date (exclusive), in date order
//!
//! Aggregates are computed by the reducers in [`climate_types::aggregate`]
//! while rows stream out of SQLite. Empty results are `None` or an empty
//! vector, never an error.
//!
//! # Example
//!
//! ```no_run
//! use climate_store::Store;
//!
//! let store = Store::open("hawaii.sqlite")?;
//!
//! match store.calc_temps("2017-02-28", "2017-03-05")? {
//!     Some(t) => println!("min {} avg {:.1} max {}", t.min, t.avg, t.max),
//!     None => println!("no observations in range"),
//! }
//!
//! if let Some(station) = store.most_active_station()? {
//!     println!("most active: {station}");
//! }
//! # Ok::<(), climate_store::Error>(())
//! ```

mod error;
mod models;
mod queries;
mod schema;
mod store;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use error::{Error, Result};
pub use models::{ColumnInfo, TableInfo};
pub use store::{DEFAULT_QUERY_TIMEOUT, QueryDate, Store};

/// Dataset file name used when none is configured.
pub const DEFAULT_DATASET_PATH: &str = "hawaii.sqlite";
