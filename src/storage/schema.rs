//! Static schema of the observation dataset
//!
//! The two tables are declared here instead of being discovered at runtime.
//! `SqliteClient::verify_schema` checks the declaration against the opened
//! file once at startup.

use serde::Serialize;
use sqlx::FromRow;

/// A declared table and the columns the service relies on
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSchema {
    /// Zero-row query that fails if the table or any declared column is missing
    pub fn probe_sql(&self) -> String {
        format!("SELECT {} FROM {} LIMIT 0", self.columns.join(", "), self.name)
    }
}

/// Station metadata, one row per physical station
pub const STATION_TABLE: TableSchema = TableSchema {
    name: "station",
    columns: &["id", "station", "name", "latitude", "longitude", "elevation"],
};

/// Daily observations, keyed by station and ISO date
pub const MEASUREMENT_TABLE: TableSchema = TableSchema {
    name: "measurement",
    columns: &["id", "station", "date", "prcp", "tobs"],
};

/// Every table the service reads
pub const TABLES: [TableSchema; 2] = [STATION_TABLE, MEASUREMENT_TABLE];

/// DDL matching the declaration, for building fixture datasets
pub const STATION_DDL: &str = r#"
    CREATE TABLE station (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude REAL,
        longitude REAL,
        elevation REAL
    )
"#;

pub const MEASUREMENT_DDL: &str = r#"
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp REAL,
        tobs REAL NOT NULL
    )
"#;

/// Station identity as exposed by the stations endpoint
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct StationRow {
    pub station: String,
    pub name: String,
}

/// Date and precipitation of one measurement; `prcp` is NULL when not recorded
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

/// Date and temperature observation of one measurement
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TobsRow {
    pub date: String,
    pub tobs: f64,
}

/// Measurement count for one station
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StationActivity {
    pub station: String,
    pub observations: i64,
}

/// MIN/AVG/MAX of `tobs`; all NULL when no rows matched
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TemperatureAggregate {
    pub min_tobs: Option<f64>,
    pub avg_tobs: Option<f64>,
    pub max_tobs: Option<f64>,
}
