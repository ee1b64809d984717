//! REST API endpoints for the climate service.
//!
//! Every data endpoint is a thin wrapper over one [`climate_store::Store`]
//! query. Handlers that need configuration copy what they need out of
//! `state.config` and release the read lock before taking `state.store`.
//!
//! ## Error Handling
//!
//! All endpoints return structured JSON errors via [`AppError`]. Malformed
//! dates map to 400, query timeouts to 503, and other store failures to 500.
//! An empty date range is not an error: it yields `null` statistics.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use climate_service::api;
//!
//! let app = api::router().with_state(state);
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use climate_store::TableInfo;
use climate_types::{
    HistogramBin, PrecipitationRecord, Station, StationActivity, TemperatureHistogram,
    TemperatureSummary,
};

use crate::config::MAX_HISTOGRAM_BINS;
use crate::state::AppState;

/// Routes advertised by `GET /`.
pub const ROUTES: &[&str] = &[
    "/api/health",
    "/api/health/detailed",
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/stations/detail",
    "/api/v1.0/stations/activity",
    "/api/v1.0/stations/most-active",
    "/api/v1.0/tobs",
    "/api/v1.0/tobs/histogram?bins=<n>",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        // Health
        .route("/api/health", get(health))
        .route("/api/health/detailed", get(health_detailed))
        // Listings
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(list_stations))
        .route("/api/v1.0/stations/detail", get(station_details))
        .route("/api/v1.0/stations/activity", get(station_activity))
        .route("/api/v1.0/stations/most-active", get(most_active_station))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/tobs/histogram", get(tobs_histogram))
        // Temperature statistics
        .route("/api/v1.0/{start}", get(temps_since))
        .route("/api/v1.0/{start}/{end}", get(temps_between))
}

/// Listing of the available routes.
async fn index() -> Json<&'static [&'static str]> {
    Json(ROUTES)
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc(),
    })
}

/// Detailed health check response with diagnostics.
#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Dataset health status
    pub dataset: DatasetHealth,
    /// Platform information
    pub platform: PlatformInfo,
}

/// Dataset health information.
#[derive(Debug, Serialize)]
pub struct DatasetHealth {
    /// Whether the dataset answered queries
    pub ok: bool,
    /// Raw row count of the stations table
    pub station_count: u64,
    /// Raw row count of the measurements table
    pub observation_count: u64,
    /// Per-query deadline in milliseconds
    pub query_timeout_ms: u64,
    /// Table layout as reported by SQLite
    pub tables: Vec<TableInfo>,
    /// Error message if the dataset is not ok
    pub error: Option<String>,
}

/// Platform information.
#[derive(Debug, Serialize)]
pub struct PlatformInfo {
    /// Operating system
    pub os: &'static str,
    /// CPU architecture
    pub arch: &'static str,
}

/// Detailed health check endpoint.
///
/// Runs a count on both tables and reads back the schema, so it holds the
/// store lock for longer than `/api/health`.
async fn health_detailed(State(state): State<Arc<AppState>>) -> Json<DetailedHealthResponse> {
    let dataset = {
        let store = state.store.lock().await;
        let query_timeout_ms = store.query_timeout().as_millis() as u64;

        let counts = store.count_total_stations().and_then(|stations| {
            let observations = store.count_observations()?;
            let tables = store.describe()?;
            Ok((stations, observations, tables))
        });

        match counts {
            Ok((station_count, observation_count, tables)) => DatasetHealth {
                ok: true,
                station_count,
                observation_count,
                query_timeout_ms,
                tables,
                error: None,
            },
            Err(e) => DatasetHealth {
                ok: false,
                station_count: 0,
                observation_count: 0,
                query_timeout_ms,
                tables: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    };

    let platform = PlatformInfo {
        os: std::env::consts::OS,
        arch: std::env::consts::ARCH,
    };

    Json(DetailedHealthResponse {
        status: if dataset.ok { "ok" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc(),
        dataset,
        platform,
    })
}

/// Precipitation records on or after the configured cutoff.
async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationRecord>>, AppError> {
    let cutoff = state.config.read().await.queries.precipitation_since.clone();
    let store = state.store.lock().await;
    Ok(Json(store.list_precipitation_since(&cutoff)?))
}

/// Distinct station identifiers.
async fn list_stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(store.list_stations()?))
}

/// Full station records.
async fn station_details(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Station>>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(store.stations()?))
}

/// Stations ranked by observation count.
async fn station_activity(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationActivity>>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(store.rank_stations_by_observation_count()?))
}

/// The station with the most observations.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] when the dataset has no observations.
async fn most_active_station(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StationActivity>, AppError> {
    let store = state.store.lock().await;
    store
        .most_active_station()?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No observations in dataset".to_string()))
}

/// Temperatures strictly after the configured cutoff, in date order.
async fn tobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<f64>>, AppError> {
    let cutoff = state.config.read().await.queries.tobs_after.clone();
    let store = state.store.lock().await;
    Ok(Json(store.temperatures_after(&cutoff)?))
}

/// Query parameters for the histogram endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct HistogramQuery {
    /// Number of bins (defaults to `queries.histogram_bins`).
    pub bins: Option<usize>,
}

/// Histogram of the temperatures served by `/api/v1.0/tobs`.
#[derive(Debug, Serialize)]
pub struct HistogramResponse {
    /// Exclusive lower date bound of the binned observations.
    pub after: String,
    /// Number of binned observations.
    pub total: u64,
    /// Bins in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// Histogram of temperatures strictly after the configured cutoff.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if `bins` is outside `1..=100`.
async fn tobs_histogram(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistogramQuery>,
) -> Result<Json<HistogramResponse>, AppError> {
    let (cutoff, default_bins) = {
        let config = state.config.read().await;
        (config.queries.tobs_after.clone(), config.queries.histogram_bins)
    };

    let bins = query.bins.unwrap_or(default_bins);
    if bins == 0 || bins > MAX_HISTOGRAM_BINS {
        return Err(AppError::BadRequest(format!(
            "bins must be between 1 and {}, got {}",
            MAX_HISTOGRAM_BINS, bins
        )));
    }

    let temperatures = {
        let store = state.store.lock().await;
        store.temperatures_after(&cutoff)?
    };

    let histogram = TemperatureHistogram::from_temperatures(&temperatures, bins);
    Ok(Json(HistogramResponse {
        after: cutoff,
        total: histogram.total(),
        bins: histogram.bins,
    }))
}

/// Temperature statistics, with `null` fields when no observations match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

impl From<Option<TemperatureSummary>> for TemperatureStats {
    fn from(summary: Option<TemperatureSummary>) -> Self {
        Self {
            tmin: summary.map(|s| s.min),
            tavg: summary.map(|s| s.avg),
            tmax: summary.map(|s| s.max),
        }
    }
}

/// Min/avg/max temperature on or after `start`.
async fn temps_since(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(store.calc_temps_since(start.as_str())?.into()))
}

/// Min/avg/max temperature for `start..=end`.
async fn temps_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(store.calc_temps(start.as_str(), end.as_str())?.into()))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Store(climate_store::Error),
}

impl From<climate_store::Error> for AppError {
    fn from(e: climate_store::Error) -> Self {
        AppError::Store(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Store(e @ climate_store::Error::InvalidDate(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Store(e @ climate_store::Error::QueryTimeout(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}
