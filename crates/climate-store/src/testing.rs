//! Throwaway datasets for tests.
//!
//! Available under `cfg(test)` and with the `test-util` feature so dependent
//! crates can build a [`Store`] over known rows.

use std::path::Path;

use rusqlite::Connection;
use time::macros::date;

use climate_types::{Observation, Station};

use crate::error::Result;
use crate::schema;
use crate::store::{DEFAULT_QUERY_TIMEOUT, Store};

/// Create the dataset tables on `conn` and insert the given rows in order.
pub fn create_dataset(
    conn: &Connection,
    observations: &[Observation],
    stations: &[Station],
) -> Result<()> {
    conn.execute_batch(schema::CREATE_TABLES)?;

    let mut insert_obs =
        conn.prepare("INSERT INTO measurements (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")?;
    for obs in observations {
        insert_obs.execute(rusqlite::params![
            obs.station_id,
            obs.date,
            obs.precipitation,
            obs.temperature,
        ])?;
    }

    let mut insert_station = conn.prepare(
        "INSERT INTO stations (station, name, latitude, longitude, elevation)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for station in stations {
        insert_station.execute(rusqlite::params![
            station.station_id,
            station.name,
            station.latitude,
            station.longitude,
            station.elevation,
        ])?;
    }

    Ok(())
}

/// Build an in-memory store over the given rows.
pub fn in_memory(observations: &[Observation], stations: &[Station]) -> Result<Store> {
    let conn = Connection::open_in_memory()?;
    create_dataset(&conn, observations, stations)?;
    Store::from_connection(conn, DEFAULT_QUERY_TIMEOUT)
}

/// Write a dataset file at `path`.
pub fn write_dataset<P: AsRef<Path>>(
    path: P,
    observations: &[Observation],
    stations: &[Station],
) -> Result<()> {
    let conn = Connection::open(path)?;
    create_dataset(&conn, observations, stations)
}

/// Two stations, three observations: A on 2017-02-28 (60) and 2017-03-05 (70),
/// B on 2017-03-01 (65).
pub fn sample_observations() -> Vec<Observation> {
    vec![
        Observation::new("A", date!(2017 - 02 - 28), 60.0).with_precipitation(0.5),
        Observation::new("A", date!(2017 - 03 - 05), 70.0),
        Observation::new("B", date!(2017 - 03 - 01), 65.0).with_precipitation(0.0),
    ]
}

/// Station records for [`sample_observations`].
pub fn sample_stations() -> Vec<Station> {
    vec![
        Station::builder("A")
            .name("WAIKIKI 717.2, HI US")
            .location(21.2716, -157.8168)
            .elevation(3.0)
            .build(),
        Station::builder("B")
            .name("KANEOHE 838.1, HI US")
            .location(21.4234, -157.8015)
            .elevation(14.6)
            .build(),
    ]
}
