//! Main store implementation.

use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, Instant};

use rusqlite::{Connection, ErrorCode, OpenFlags, Row, params_from_iter};
use time::Date;
use tracing::{debug, info, warn};

use climate_types::aggregate::{ActivityCounter, TemperatureAccumulator};
use climate_types::{
    PrecipitationRecord, Station, StationActivity, TemperatureObservation, TemperatureSummary,
    parse_date,
};

use crate::error::{Error, Result};
use crate::models::TableInfo;
use crate::queries::DateFilter;
use crate::schema;

/// Default deadline for a single query.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite virtual machine instructions between deadline checks.
const PROGRESS_INTERVAL_OPS: i32 = 1_000;

/// A date argument: either an already typed [`Date`] or a `YYYY-MM-DD` string.
///
/// Strings are validated before any SQL runs; a malformed one yields
/// [`Error::InvalidDate`].
pub trait QueryDate {
    /// Resolve to a calendar date.
    fn query_date(&self) -> Result<Date>;
}

impl QueryDate for Date {
    fn query_date(&self) -> Result<Date> {
        Ok(*self)
    }
}

impl QueryDate for str {
    fn query_date(&self) -> Result<Date> {
        Ok(parse_date(self)?)
    }
}

impl QueryDate for String {
    fn query_date(&self) -> Result<Date> {
        self.as_str().query_date()
    }
}

impl<T: QueryDate + ?Sized> QueryDate for &T {
    fn query_date(&self) -> Result<Date> {
        (**self).query_date()
    }
}

/// Read-only accessor over the climate dataset.
///
/// Holds one SQLite connection, opened once and reused for every query. The
/// connection is switched to `query_only` mode, so nothing issued through it
/// can modify the dataset. Every query runs under a deadline; see
/// [`Store::query_timeout`].
pub struct Store {
    conn: Connection,
    query_timeout: Duration,
}

impl Store {
    /// Open the dataset at `path` read-only with the default query timeout.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_QUERY_TIMEOUT)
    }

    /// Open the dataset at `path` read-only.
    ///
    /// Fails with [`Error::Open`] if the file is missing or not a SQLite
    /// database, and with [`Error::MissingTable`] / [`Error::MissingColumn`]
    /// if it lacks the expected layout.
    pub fn open_with_timeout<P: AsRef<Path>>(path: P, query_timeout: Duration) -> Result<Self> {
        let path = path.as_ref();

        info!("Opening dataset at {}", path.display());
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
            | OpenFlags::SQLITE_OPEN_URI;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        // A file that is not a database only fails on first read.
        Self::from_connection(conn, query_timeout).map_err(|e| match e {
            Error::Database(source) => Error::Open {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Wrap an existing connection, validating the dataset layout.
    pub fn from_connection(conn: Connection, query_timeout: Duration) -> Result<Self> {
        conn.execute_batch("PRAGMA query_only = ON;")?;
        conn.busy_timeout(query_timeout)?;

        schema::validate(&conn)?;

        let store = Self {
            conn,
            query_timeout,
        };

        for table in store.describe()? {
            debug!("Dataset table {}", table.summary());
        }

        Ok(store)
    }

    /// Deadline applied to each query.
    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Column layout of both dataset tables.
    pub fn describe(&self) -> Result<Vec<TableInfo>> {
        schema::describe(&self.conn)
    }

    /// Run `f` against the connection under the query deadline.
    fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        if let Some(deadline) = Instant::now().checked_add(self.query_timeout) {
            self.conn.progress_handler(
                PROGRESS_INTERVAL_OPS,
                Some(move || Instant::now() >= deadline),
            );
        }

        let result = f(&self.conn);
        self.conn.progress_handler(0, None::<fn() -> bool>);

        result.map_err(|e| {
            if e.sqlite_error_code() == Some(ErrorCode::OperationInterrupted) {
                warn!("Query interrupted after {:?}", self.query_timeout);
                Error::QueryTimeout(self.query_timeout)
            } else {
                Error::Database(e)
            }
        })
    }

    /// Collect the rows selected by `filter` through `map`.
    fn collect_measurements<T, F>(&self, filter: &DateFilter, columns: &str, mut map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let (sql, params) = filter.build_sql(columns);
        debug!("Executing query: {}", sql);

        self.run(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(params.iter()), |row| map(row))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    /// Feed every row selected by `filter` to `visit` without buffering.
    fn for_each_measurement<F>(&self, filter: &DateFilter, columns: &str, mut visit: F) -> Result<()>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<()>,
    {
        let (sql, params) = filter.build_sql(columns);
        debug!("Executing query: {}", sql);

        self.run(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(params.iter()))?;
            while let Some(row) = rows.next()? {
                visit(row)?;
            }
            Ok(())
        })
    }
}

// Observation queries
impl Store {
    /// Precipitation series for every observation on or after `cutoff`.
    ///
    /// Rows come back in storage order. Each record carries its own row's
    /// date and precipitation.
    pub fn list_precipitation_since(&self, cutoff: impl QueryDate) -> Result<Vec<PrecipitationRecord>> {
        let filter = DateFilter::new().since(cutoff.query_date()?);

        let records = self.collect_measurements(&filter, "date, prcp", |row| {
            Ok(PrecipitationRecord {
                date: row.get(0)?,
                precipitation: row.get(1)?,
            })
        })?;

        debug!("Fetched {} precipitation records", records.len());
        Ok(records)
    }

    /// Minimum, mean and maximum temperature for `start <= date <= end`.
    ///
    /// Returns `Ok(None)` when no row with a temperature matches, which
    /// includes every range where `start > end`.
    pub fn calc_temps(
        &self,
        start: impl QueryDate,
        end: impl QueryDate,
    ) -> Result<Option<TemperatureSummary>> {
        let filter = DateFilter::between(start.query_date()?, end.query_date()?);
        self.summarize_temperatures(&filter)
    }

    /// Minimum, mean and maximum temperature for every observation on or after `start`.
    pub fn calc_temps_since(&self, start: impl QueryDate) -> Result<Option<TemperatureSummary>> {
        let filter = DateFilter::new().since(start.query_date()?);
        self.summarize_temperatures(&filter)
    }

    fn summarize_temperatures(&self, filter: &DateFilter) -> Result<Option<TemperatureSummary>> {
        let mut acc = TemperatureAccumulator::new();
        self.for_each_measurement(filter, "tobs", |row| {
            acc.push_optional(row.get(0)?);
            Ok(())
        })?;

        debug!("Summarized {} temperatures", acc.count());
        Ok(acc.finish())
    }

    /// Temperature observations strictly after `cutoff`, ascending by date.
    ///
    /// Rows without a temperature or without a station id are left out, since
    /// [`TemperatureObservation`] carries both as plain values.
    pub fn last_year_observations_for(
        &self,
        cutoff: impl QueryDate,
    ) -> Result<Vec<TemperatureObservation>> {
        let filter = DateFilter::new()
            .after(cutoff.query_date()?)
            .with_temperature()
            .ordered_by_date();

        let rows = self.collect_measurements(&filter, "station, date, tobs", |row| {
            let Some(station_id) = row.get::<_, Option<String>>(0)? else {
                return Ok(None);
            };
            Ok(Some(TemperatureObservation {
                station_id,
                date: row.get(1)?,
                temperature: row.get(2)?,
            }))
        })?;
        let observations: Vec<TemperatureObservation> = rows.into_iter().flatten().collect();

        debug!("Fetched {} temperature observations", observations.len());
        Ok(observations)
    }

    /// Bare temperatures strictly after `cutoff`, ascending by date.
    pub fn temperatures_after(&self, cutoff: impl QueryDate) -> Result<Vec<f64>> {
        let filter = DateFilter::new()
            .after(cutoff.query_date()?)
            .with_temperature()
            .ordered_by_date();

        self.collect_measurements(&filter, "tobs", |row| row.get(0))
    }

    /// Number of observation rows.
    pub fn count_observations(&self) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", schema::MEASUREMENTS);
        let count: i64 = self.run(|conn| conn.query_row(&sql, [], |row| row.get(0)))?;
        Ok(count as u64)
    }
}

// Station queries
impl Store {
    /// Distinct station ids in storage order.
    pub fn list_stations(&self) -> Result<Vec<String>> {
        let sql = format!("SELECT station FROM {}", schema::STATIONS);
        let ids: Vec<String> = self.run(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let ids = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(ids)
        })?;

        let mut seen = HashSet::new();
        Ok(ids.into_iter().filter(|id| seen.insert(id.clone())).collect())
    }

    /// Full station records in storage order.
    pub fn stations(&self) -> Result<Vec<Station>> {
        let sql = format!(
            "SELECT station, name, latitude, longitude, elevation FROM {}",
            schema::STATIONS
        );

        self.run(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let stations = stmt
                .query_map([], |row| {
                    Ok(Station {
                        station_id: row.get(0)?,
                        name: row.get(1)?,
                        latitude: row.get(2)?,
                        longitude: row.get(3)?,
                        elevation: row.get(4)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(stations)
        })
    }

    /// Number of rows in the stations table, duplicates included.
    pub fn count_total_stations(&self) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", schema::STATIONS);
        let count: i64 = self.run(|conn| conn.query_row(&sql, [], |row| row.get(0)))?;
        Ok(count as u64)
    }

    /// Stations ordered by number of temperature observations, most active first.
    ///
    /// Ties are broken by station id ascending. Rows without a station id
    /// belong to no station and are not counted.
    pub fn rank_stations_by_observation_count(&self) -> Result<Vec<StationActivity>> {
        let mut counter = ActivityCounter::new();
        self.for_each_measurement(&DateFilter::new(), "station, tobs", |row| {
            let station: Option<String> = row.get(0)?;
            if let Some(station) = station {
                counter.push(&station, row.get(1)?);
            }
            Ok(())
        })?;

        debug!("Ranked {} stations", counter.station_count());
        Ok(counter.finish())
    }

    /// The station with the most temperature observations, `None` without data.
    pub fn most_active_station(&self) -> Result<Option<StationActivity>> {
        Ok(self.rank_stations_by_observation_count()?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use climate_types::Observation;
    use time::macros::date;

    fn scenario_store() -> Store {
        testing::in_memory(&testing::sample_observations(), &testing::sample_stations()).unwrap()
    }

    fn empty_store() -> Store {
        testing::in_memory(&[], &[]).unwrap()
    }

    #[test]
    fn test_calc_temps_scenario() {
        let store = scenario_store();
        let summary = store.calc_temps("2017-02-28", "2017-03-05").unwrap().unwrap();
        assert_eq!(summary.min, 60.0);
        assert_eq!(summary.avg, 65.0);
        assert_eq!(summary.max, 70.0);
    }

    #[test]
    fn test_calc_temps_accepts_typed_dates() {
        let store = scenario_store();
        let summary = store
            .calc_temps(date!(2017 - 03 - 01), date!(2017 - 03 - 05))
            .unwrap()
            .unwrap();
        assert_eq!(summary.min, 65.0);
        assert_eq!(summary.avg, 67.5);
        assert_eq!(summary.max, 70.0);
    }

    #[test]
    fn test_calc_temps_bounds_are_inclusive() {
        let store = scenario_store();
        let summary = store.calc_temps("2017-02-28", "2017-02-28").unwrap().unwrap();
        assert_eq!(summary.min, 60.0);
        assert_eq!(summary.max, 60.0);
    }

    #[test]
    fn test_calc_temps_empty_range_is_none() {
        let store = scenario_store();
        assert_eq!(store.calc_temps("2010-01-01", "2010-12-31").unwrap(), None);
        // Reversed range matches nothing.
        assert_eq!(store.calc_temps("2017-03-05", "2017-02-28").unwrap(), None);
        assert_eq!(empty_store().calc_temps("2017-01-01", "2017-12-31").unwrap(), None);
    }

    #[test]
    fn test_calc_temps_rejects_malformed_dates() {
        let store = scenario_store();
        let err = store.calc_temps("2017-02-28", "March 5th").unwrap_err();
        assert!(matches!(err, Error::InvalidDate(_)));
        assert!(!err.is_connection_error());
    }

    #[test]
    fn test_calc_temps_since() {
        let store = scenario_store();
        let summary = store.calc_temps_since("2017-03-01").unwrap().unwrap();
        assert_eq!(summary.min, 65.0);
        assert_eq!(summary.max, 70.0);
        assert_eq!(store.calc_temps_since("2018-01-01").unwrap(), None);
    }

    #[test]
    fn test_calc_temps_skips_null_temperatures() {
        let conn = Connection::open_in_memory().unwrap();
        testing::create_dataset(&conn, &testing::sample_observations(), &[]).unwrap();
        conn.execute(
            "INSERT INTO measurements (station, date, prcp, tobs) VALUES ('C', '2017-03-02', 0.1, NULL)",
            [],
        )
        .unwrap();
        let store = Store::from_connection(conn, DEFAULT_QUERY_TIMEOUT).unwrap();

        let summary = store.calc_temps("2017-02-28", "2017-03-05").unwrap().unwrap();
        assert_eq!(summary.avg, 65.0);

        let ranking = store.rank_stations_by_observation_count().unwrap();
        let c = ranking.iter().find(|a| a.station_id == "C").unwrap();
        assert_eq!(c.observation_count, 0);
        assert_eq!(ranking.last().unwrap().station_id, "C");

        // Rows without a temperature are left out of temperature listings.
        let observations = store.last_year_observations_for("2017-01-01").unwrap();
        assert_eq!(observations.len(), 3);
    }

    #[test]
    fn test_list_precipitation_since_is_inclusive() {
        let store = scenario_store();
        let records = store.list_precipitation_since("2017-03-01").unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.date >= date!(2017 - 03 - 01)));
    }

    #[test]
    fn test_list_precipitation_carries_row_values() {
        let store = scenario_store();
        let records = store.list_precipitation_since("2017-01-01").unwrap();

        // Storage order, each record with its own row's values.
        assert_eq!(
            records,
            vec![
                PrecipitationRecord {
                    date: date!(2017 - 02 - 28),
                    precipitation: Some(0.5),
                },
                PrecipitationRecord {
                    date: date!(2017 - 03 - 05),
                    precipitation: None,
                },
                PrecipitationRecord {
                    date: date!(2017 - 03 - 01),
                    precipitation: Some(0.0),
                },
            ]
        );
    }

    #[test]
    fn test_list_precipitation_empty_range() {
        let store = scenario_store();
        assert!(store.list_precipitation_since("2020-01-01").unwrap().is_empty());
    }

    #[test]
    fn test_last_year_observations_exclusive_and_sorted() {
        let store = scenario_store();
        let observations = store.last_year_observations_for("2017-02-28").unwrap();

        let dates: Vec<Date> = observations.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date!(2017 - 03 - 01), date!(2017 - 03 - 05)]);
        assert_eq!(observations[0].station_id, "B");
        assert_eq!(observations[0].temperature, 65.0);
    }

    #[test]
    fn test_duplicate_observations_pass_through() {
        let observations = vec![
            Observation::new("A", date!(2017 - 03 - 01), 60.0).with_precipitation(0.1),
            Observation::new("A", date!(2017 - 03 - 01), 70.0).with_precipitation(0.3),
        ];
        let store = testing::in_memory(&observations, &[]).unwrap();

        let records = store.list_precipitation_since("2017-01-01").unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.date == date!(2017 - 03 - 01)));
        assert_eq!(records[0].precipitation, Some(0.1));
        assert_eq!(records[1].precipitation, Some(0.3));

        let summary = store.calc_temps("2017-03-01", "2017-03-01").unwrap().unwrap();
        assert_eq!((summary.min, summary.avg, summary.max), (60.0, 65.0, 70.0));

        let ranking = store.rank_stations_by_observation_count().unwrap();
        assert_eq!(
            ranking,
            vec![StationActivity {
                station_id: "A".to_string(),
                observation_count: 2,
            }]
        );
        assert_eq!(store.last_year_observations_for("2017-01-01").unwrap().len(), 2);
    }

    #[test]
    fn test_rows_without_station_are_skipped() {
        let conn = Connection::open_in_memory().unwrap();
        testing::create_dataset(&conn, &testing::sample_observations(), &[]).unwrap();
        conn.execute(
            "INSERT INTO measurements (station, date, prcp, tobs) VALUES (NULL, '2017-03-02', 0.1, 61)",
            [],
        )
        .unwrap();
        let store = Store::from_connection(conn, DEFAULT_QUERY_TIMEOUT).unwrap();

        let ranking = store.rank_stations_by_observation_count().unwrap();
        let ids: Vec<_> = ranking.iter().map(|a| a.station_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(ranking[0].observation_count, 2);

        let observations = store.last_year_observations_for("2017-01-01").unwrap();
        let dates: Vec<Date> = observations.iter().map(|o| o.date).collect();
        assert_eq!(
            dates,
            vec![date!(2017 - 02 - 28), date!(2017 - 03 - 01), date!(2017 - 03 - 05)]
        );

        // Station-independent queries still see the row.
        assert_eq!(store.list_precipitation_since("2017-03-02").unwrap().len(), 2);
        assert_eq!(store.temperatures_after("2017-01-01").unwrap(), vec![60.0, 65.0, 61.0, 70.0]);
        let summary = store.calc_temps("2017-03-02", "2017-03-02").unwrap().unwrap();
        assert_eq!(summary.avg, 61.0);
    }

    #[test]
    fn test_temperatures_after() {
        let store = scenario_store();
        assert_eq!(store.temperatures_after("2017-01-01").unwrap(), vec![60.0, 65.0, 70.0]);
        assert!(store.temperatures_after("2017-03-05").unwrap().is_empty());
    }

    #[test]
    fn test_rank_stations_scenario() {
        let store = scenario_store();
        let ranking = store.rank_stations_by_observation_count().unwrap();
        assert_eq!(
            ranking,
            vec![
                StationActivity {
                    station_id: "A".to_string(),
                    observation_count: 2,
                },
                StationActivity {
                    station_id: "B".to_string(),
                    observation_count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_rank_stations_sorted_descending() {
        let observations: Vec<Observation> = ["C", "A", "C", "B", "C", "A", "D"]
            .iter()
            .enumerate()
            .map(|(i, s)| Observation::new(*s, date!(2017 - 01 - 01) + time::Duration::days(i as i64), 70.0))
            .collect();
        let store = testing::in_memory(&observations, &[]).unwrap();

        let ranking = store.rank_stations_by_observation_count().unwrap();
        for pair in ranking.windows(2) {
            assert!(pair[0].observation_count >= pair[1].observation_count);
        }
        let ids: Vec<_> = ranking.iter().map(|a| a.station_id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_most_active_station_matches_ranking() {
        let store = scenario_store();
        let ranking = store.rank_stations_by_observation_count().unwrap();
        let most_active = store.most_active_station().unwrap();
        assert_eq!(most_active.as_ref(), ranking.first());
    }

    #[test]
    fn test_most_active_station_without_data() {
        assert_eq!(empty_store().most_active_station().unwrap(), None);
    }

    #[test]
    fn test_list_stations_distinct_in_storage_order() {
        let stations = vec![
            Station::builder("B").name("Second").build(),
            Station::builder("A").name("First").build(),
            Station::builder("B").name("Duplicate").build(),
        ];
        let store = testing::in_memory(&[], &stations).unwrap();

        assert_eq!(store.list_stations().unwrap(), vec!["B", "A"]);
        // Raw row count keeps the duplicate.
        assert_eq!(store.count_total_stations().unwrap(), 3);
        assert_eq!(store.stations().unwrap().len(), 3);
    }

    #[test]
    fn test_stations_records() {
        let store = scenario_store();
        let stations = store.stations().unwrap();
        assert_eq!(stations, testing::sample_stations());
    }

    #[test]
    fn test_counts_on_empty_dataset() {
        let store = empty_store();
        assert_eq!(store.count_total_stations().unwrap(), 0);
        assert_eq!(store.count_observations().unwrap(), 0);
        assert!(store.list_stations().unwrap().is_empty());
        assert!(store.rank_stations_by_observation_count().unwrap().is_empty());
    }

    #[test]
    fn test_count_observations() {
        assert_eq!(scenario_store().count_observations().unwrap(), 3);
    }

    #[test]
    fn test_store_is_read_only() {
        let store = scenario_store();
        let result = store.conn.execute("DELETE FROM measurements", []);
        assert!(result.is_err());
        assert_eq!(store.count_observations().unwrap(), 3);
    }

    #[test]
    fn test_query_timeout_interrupts() {
        let conn = Connection::open_in_memory().unwrap();
        testing::create_dataset(&conn, &[], &[]).unwrap();
        let store = Store::from_connection(conn, Duration::ZERO).unwrap();

        let result = store.run(|conn| {
            conn.query_row(
                "WITH RECURSIVE n(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM n) \
                 SELECT COUNT(*) FROM n",
                [],
                |row| row.get::<_, i64>(0),
            )
        });

        assert!(matches!(result, Err(Error::QueryTimeout(d)) if d == Duration::ZERO));
        assert_eq!(store.query_timeout(), Duration::ZERO);

        // The handler is removed afterwards; the store still answers.
        let rows: i64 = store
            .conn
            .query_row(
                "WITH RECURSIVE n(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM n WHERE x < 10000) \
                 SELECT COUNT(*) FROM n",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(rows, 10_000);
        assert_eq!(store.count_observations().unwrap(), 0);
    }

    #[test]
    fn test_open_file_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hawaii.sqlite");
        testing::write_dataset(&path, &testing::sample_observations(), &testing::sample_stations())
            .unwrap();

        let store = Store::open(&path).unwrap();
        assert_eq!(store.query_timeout(), DEFAULT_QUERY_TIMEOUT);
        assert_eq!(store.count_total_stations().unwrap(), 2);
        assert_eq!(store.most_active_station().unwrap().unwrap().station_id, "A");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Store::open(dir.path().join("missing.sqlite")).err().unwrap();
        assert!(matches!(err, Error::Open { .. }));
        assert!(err.is_connection_error());
    }

    #[test]
    fn test_open_not_a_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.sqlite");
        std::fs::write(&path, vec![0x42u8; 4096]).unwrap();

        let err = Store::open(&path).err().unwrap();
        assert!(matches!(err, Error::Open { .. }));
    }

    #[test]
    fn test_open_wrong_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.sqlite");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE readings (id INTEGER);").unwrap();
        }

        let err = Store::open(&path).err().unwrap();
        assert!(matches!(err, Error::MissingTable("measurements")));
    }

    #[test]
    fn test_describe() {
        let tables = scenario_store().describe().unwrap();
        assert_eq!(tables.len(), 2);
        assert!(tables[0].columns.iter().any(|c| c.name == "tobs"));
    }
}
