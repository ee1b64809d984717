//! Dataset schema: table names, required columns, and validation.
//!
//! The dataset is externally owned. The accessor never creates or migrates
//! tables; it only checks at open time that the columns it reads exist.

use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::models::{ColumnInfo, TableInfo};

/// Table holding one row per observation.
pub const MEASUREMENTS: &str = "measurements";
/// Table holding one row per station.
pub const STATIONS: &str = "stations";

/// Columns the accessor reads from [`MEASUREMENTS`].
pub const MEASUREMENT_COLUMNS: &[&str] = &["station", "date", "prcp", "tobs"];
/// Columns the accessor reads from [`STATIONS`].
pub const STATION_COLUMNS: &[&str] = &["station", "name", "latitude", "longitude", "elevation"];

/// DDL matching the layout of the published dataset.
#[cfg(any(test, feature = "test-util"))]
pub(crate) const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS measurements (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        station TEXT,
        date TEXT,
        prcp REAL,
        tobs REAL
    );

    CREATE TABLE IF NOT EXISTS stations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        station TEXT,
        name TEXT,
        latitude REAL,
        longitude REAL,
        elevation REAL
    );
"#;

/// Check that both tables and every column the accessor reads are present.
pub fn validate(conn: &Connection) -> Result<()> {
    check_table(conn, MEASUREMENTS, MEASUREMENT_COLUMNS)?;
    check_table(conn, STATIONS, STATION_COLUMNS)?;
    Ok(())
}

fn check_table(conn: &Connection, table: &'static str, required: &[&'static str]) -> Result<()> {
    let columns = table_columns(conn, table)?;
    if columns.is_empty() {
        return Err(Error::MissingTable(table));
    }

    for &column in required {
        if !columns.iter().any(|c| c.name.eq_ignore_ascii_case(column)) {
            return Err(Error::MissingColumn { table, column });
        }
    }

    Ok(())
}

/// Column names and declared types of a table, in declaration order.
///
/// Returns an empty list if the table does not exist.
fn table_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    let mut stmt = conn.prepare("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")?;
    let columns = stmt
        .query_map([table], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                declared_type: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(columns)
}

/// Describe both dataset tables.
pub fn describe(conn: &Connection) -> Result<Vec<TableInfo>> {
    [MEASUREMENTS, STATIONS]
        .into_iter()
        .map(|name| {
            Ok(TableInfo {
                name: name.to_string(),
                columns: table_columns(conn, name)?,
            })
        })
        .collect()
}
