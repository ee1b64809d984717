//! HTTP REST API over a read-only weather-station climate dataset.
//!
//! This crate provides a service that:
//! - Opens the dataset once, read-only, with a per-query deadline
//! - Exposes the accessor's queries as JSON endpoints
//! - Prints a plain-text summary of the dataset (`report` command)
//!
//! # REST API Endpoints
//!
//! - `GET /` - Listing of the available routes
//! - `GET /api/health` - Service health check
//! - `GET /api/health/detailed` - Health check with dataset diagnostics
//! - `GET /api/v1.0/precipitation` - Precipitation since the configured cutoff
//! - `GET /api/v1.0/stations` - Station identifiers
//! - `GET /api/v1.0/stations/detail` - Full station records
//! - `GET /api/v1.0/stations/activity` - Stations ranked by observation count
//! - `GET /api/v1.0/stations/most-active` - The most active station
//! - `GET /api/v1.0/tobs` - Temperatures after the configured cutoff
//! - `GET /api/v1.0/tobs/histogram?bins=N` - Histogram of those temperatures
//! - `GET /api/v1.0/{start}` - TMIN/TAVG/TMAX from `start`
//! - `GET /api/v1.0/{start}/{end}` - TMIN/TAVG/TMAX for `start..=end`
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/climate/server.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [storage]
//! path = "hawaii.sqlite"
//! query_timeout_ms = 5000
//!
//! [queries]
//! precipitation_since = "2017-01-01"
//! tobs_after = "2017-01-01"
//! histogram_bins = 12
//! ```

pub mod api;
pub mod config;
pub mod report;
pub mod state;

pub use config::{Config, ConfigError, QueryConfig, ServerConfig, StorageConfig, ValidationError};
pub use report::{Report, ReportOptions};
pub use state::AppState;
