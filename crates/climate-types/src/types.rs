//! Core records for weather-station climate data.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::{DateError, DateResult};

/// Calendar date layout used by the dataset and by every query bound.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[cfg(feature = "serde")]
time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` calendar date.
///
/// Anything else (missing zero padding, trailing text, impossible days such
/// as `2017-02-30`) is rejected with [`DateError::Invalid`].
///
/// # Examples
///
/// ```
/// use climate_types::parse_date;
///
/// let date = parse_date("2017-02-28").unwrap();
/// assert_eq!(date.to_string(), "2017-02-28");
/// assert!(parse_date("2017-2-28").is_err());
/// assert!(parse_date("28/02/2017").is_err());
/// ```
pub fn parse_date(input: &str) -> DateResult<Date> {
    let invalid = || DateError::Invalid {
        input: input.to_string(),
    };

    if input.len() != 10 {
        return Err(invalid());
    }

    Date::parse(input, DATE_FORMAT).map_err(|_| invalid())
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    // The format only contains components every `Date` has.
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// A single station/date measurement record.
///
/// Observations are not unique per `(station_id, date)`; duplicates in the
/// dataset are passed through unchanged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Identifier of the reporting station.
    #[cfg_attr(feature = "serde", serde(rename = "station"))]
    pub station_id: String,
    /// Observation date.
    #[cfg_attr(feature = "serde", serde(with = "iso_date"))]
    pub date: Date,
    /// Precipitation, if it was measured.
    #[cfg_attr(feature = "serde", serde(rename = "prcp"))]
    pub precipitation: Option<f64>,
    /// Temperature observation (tobs).
    #[cfg_attr(feature = "serde", serde(rename = "tobs"))]
    pub temperature: f64,
}

impl Observation {
    /// Create an observation without a precipitation value.
    pub fn new(station_id: impl Into<String>, date: Date, temperature: f64) -> Self {
        Self {
            station_id: station_id.into(),
            date,
            precipitation: None,
            temperature,
        }
    }

    /// Set the precipitation value.
    #[must_use]
    pub fn with_precipitation(mut self, precipitation: f64) -> Self {
        self.precipitation = Some(precipitation);
        self
    }
}

/// A fixed weather-reporting location.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Station {
    /// Station identifier, the join key to [`Observation::station_id`].
    #[cfg_attr(feature = "serde", serde(rename = "station"))]
    pub station_id: String,
    /// Human readable station name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Elevation above sea level.
    pub elevation: f64,
}

impl Station {
    /// Create a builder for constructing a `Station`.
    pub fn builder(station_id: impl Into<String>) -> StationBuilder {
        StationBuilder {
            station: Station {
                station_id: station_id.into(),
                ..Default::default()
            },
        }
    }
}

/// Builder for constructing a [`Station`].
#[derive(Debug, Clone)]
#[must_use]
pub struct StationBuilder {
    station: Station,
}

impl StationBuilder {
    /// Set the station name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.station.name = name.into();
        self
    }

    /// Set the station coordinates.
    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.station.latitude = latitude;
        self.station.longitude = longitude;
        self
    }

    /// Set the station elevation.
    pub fn elevation(mut self, elevation: f64) -> Self {
        self.station.elevation = elevation;
        self
    }

    /// Build the station.
    pub fn build(self) -> Station {
        self.station
    }
}

/// One entry of a precipitation series.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrecipitationRecord {
    /// Observation date.
    #[cfg_attr(feature = "serde", serde(with = "iso_date"))]
    pub date: Date,
    /// Precipitation, `None` where the station did not report one.
    #[cfg_attr(feature = "serde", serde(rename = "prcp"))]
    pub precipitation: Option<f64>,
}

/// A temperature observation with its station and date.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemperatureObservation {
    /// Identifier of the reporting station.
    #[cfg_attr(feature = "serde", serde(rename = "station"))]
    pub station_id: String,
    /// Observation date.
    #[cfg_attr(feature = "serde", serde(with = "iso_date"))]
    pub date: Date,
    /// Temperature observation (tobs).
    #[cfg_attr(feature = "serde", serde(rename = "tobs"))]
    pub temperature: f64,
}

/// Number of temperature observations reported by one station.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StationActivity {
    /// Station identifier.
    #[cfg_attr(feature = "serde", serde(rename = "station"))]
    pub station_id: String,
    /// Count of non-null temperature observations.
    #[cfg_attr(feature = "serde", serde(rename = "count"))]
    pub observation_count: u64,
}

impl fmt::Display for StationActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} observations)", self.station_id, self.observation_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_date_valid() {
        assert_eq!(parse_date("2017-02-28").unwrap(), date!(2017 - 02 - 28));
        assert_eq!(parse_date("2016-02-29").unwrap(), date!(2016 - 02 - 29));
    }

    #[test]
    fn test_parse_date_rejects_malformed() {
        for input in [
            "",
            "2017",
            "2017-2-28",
            "2017-02-30",
            "2017-13-01",
            "2017/02/28",
            "2017-02-28T00:00",
            " 2017-02-28",
            "abcd-ef-gh",
        ] {
            let err = parse_date(input).unwrap_err();
            assert_eq!(
                err,
                DateError::Invalid {
                    input: input.to_string()
                }
            );
        }
    }

    #[test]
    fn test_parse_date_error_display() {
        let err = parse_date("yesterday").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid date 'yesterday': expected format YYYY-MM-DD"
        );
    }

    #[test]
    fn test_format_date_zero_pads() {
        assert_eq!(format_date(date!(2017 - 01 - 06)), "2017-01-06");
    }

    #[test]
    fn test_observation_builder() {
        let obs = Observation::new("USC00519397", date!(2017 - 01 - 01), 62.0)
            .with_precipitation(0.08);
        assert_eq!(obs.station_id, "USC00519397");
        assert_eq!(obs.precipitation, Some(0.08));
        assert_eq!(obs.temperature, 62.0);
    }

    #[test]
    fn test_station_builder() {
        let station = Station::builder("USC00519397")
            .name("WAIKIKI 717.2, HI US")
            .location(21.2716, -157.8168)
            .elevation(3.0)
            .build();
        assert_eq!(station.station_id, "USC00519397");
        assert_eq!(station.name, "WAIKIKI 717.2, HI US");
        assert_eq!(station.latitude, 21.2716);
        assert_eq!(station.longitude, -157.8168);
        assert_eq!(station.elevation, 3.0);
    }

    #[test]
    fn test_station_activity_display() {
        let activity = StationActivity {
            station_id: "USC00519281".to_string(),
            observation_count: 2772,
        };
        assert_eq!(activity.to_string(), "USC00519281 (2772 observations)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_observation_serialization_uses_dataset_names() {
        let obs = Observation::new("A", date!(2017 - 03 - 05), 70.0).with_precipitation(0.5);
        let json = serde_json::to_value(&obs).unwrap();
        assert_eq!(json["station"], "A");
        assert_eq!(json["date"], "2017-03-05");
        assert_eq!(json["prcp"], 0.5);
        assert_eq!(json["tobs"], 70.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_precipitation_record_null_prcp() {
        let record = PrecipitationRecord {
            date: date!(2017 - 01 - 01),
            precipitation: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"date":"2017-01-01","prcp":null}"#);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_temperature_observation_deserialization() {
        let json = r#"{"station":"B","date":"2017-03-01","tobs":65.0}"#;
        let obs: TemperatureObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.station_id, "B");
        assert_eq!(obs.date, date!(2017 - 03 - 01));
        assert_eq!(obs.temperature, 65.0);
    }
}
