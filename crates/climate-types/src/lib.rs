//! Typed records and storage-independent reducers for weather-station climate data.
//!
//! This crate provides the shared vocabulary used by the accessor
//! (climate-store) and the HTTP layer (climate-service).
//!
//! # Features
//!
//! - [`Observation`] and [`Station`] records for the two dataset entities
//! - Derived records returned by queries ([`PrecipitationRecord`],
//!   [`TemperatureObservation`], [`StationActivity`])
//! - Strict `YYYY-MM-DD` date parsing
//! - Reducers for temperature summaries, station rankings and histograms
//!
//! # Example
//!
//! ```
//! use climate_types::{Observation, parse_date, aggregate::rank_stations};
//!
//! let observations = vec![
//!     Observation::new("A", parse_date("2017-02-28")?, 60.0),
//!     Observation::new("A", parse_date("2017-03-05")?, 70.0),
//!     Observation::new("B", parse_date("2017-03-01")?, 65.0),
//! ];
//!
//! let ranking = rank_stations(&observations);
//! assert_eq!(ranking[0].station_id, "A");
//! assert_eq!(ranking[0].observation_count, 2);
//! # Ok::<(), climate_types::DateError>(())
//! ```

pub mod aggregate;
pub mod error;
pub mod types;

pub use aggregate::{HistogramBin, TemperatureHistogram, TemperatureSummary};
pub use error::{DateError, DateResult};
pub use types::{
    DATE_FORMAT, Observation, PrecipitationRecord, Station, StationActivity,
    TemperatureObservation, format_date, parse_date,
};

#[cfg(feature = "serde")]
pub use types::iso_date;
