//! Test fixtures for building on-disk observation datasets
//!
//! Rows are inserted in the order they are added, so SQLite's natural row
//! order in the tests is the insertion order.

use climate_observations::config::DatabaseConfig;
use climate_observations::storage::schema::{MEASUREMENT_DDL, STATION_DDL};
use climate_observations::{ObservationQueryService, SqliteClient};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use tempfile::TempDir;

/// Station identifiers borrowed from the Hawaii dataset
pub struct TestStations;

impl TestStations {
    pub const WAIKIKI: (&'static str, &'static str) = ("USC00519397", "WAIKIKI 717.2, HI US");
    pub const KANEOHE: (&'static str, &'static str) =
        ("USC00513117", "KANEOHE 838.1, HI US");
    pub const WAIHEE: (&'static str, &'static str) = ("USC00519281", "WAIHEE 837.5, HI US");
}

#[derive(Debug, Clone)]
struct MeasurementSeed {
    station: String,
    date: String,
    prcp: Option<f64>,
    tobs: f64,
}

/// Builder for a temporary dataset file
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    stations: Vec<(String, String)>,
    measurements: Vec<MeasurementSeed>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn station(mut self, (station, name): (&str, &str)) -> Self {
        self.stations.push((station.to_string(), name.to_string()));
        self
    }

    pub fn measurement(mut self, station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Self {
        self.measurements.push(MeasurementSeed {
            station: station.to_string(),
            date: date.to_string(),
            prcp,
            tobs,
        });
        self
    }

    /// Write the dataset and open it read-only through the service
    pub async fn build(self) -> TestDataset {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("hawaii.sqlite");

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options)
            .await
            .expect("create dataset");

        sqlx::query(STATION_DDL).execute(&mut conn).await.unwrap();
        sqlx::query(MEASUREMENT_DDL).execute(&mut conn).await.unwrap();

        for (station, name) in &self.stations {
            sqlx::query("INSERT INTO station (station, name) VALUES (?1, ?2)")
                .bind(station)
                .bind(name)
                .execute(&mut conn)
                .await
                .unwrap();
        }

        for m in &self.measurements {
            sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
                .bind(&m.station)
                .bind(&m.date)
                .bind(m.prcp)
                .bind(m.tobs)
                .execute(&mut conn)
                .await
                .unwrap();
        }

        conn.close().await.unwrap();

        let config = DatabaseConfig {
            path,
            ..Default::default()
        };
        let client = SqliteClient::connect(&config).await.expect("open dataset");

        TestDataset {
            _dir: dir,
            client: client.clone(),
            service: ObservationQueryService::new(client),
        }
    }
}

/// An opened dataset; the file lives as long as this value
pub struct TestDataset {
    _dir: TempDir,
    pub client: SqliteClient,
    pub service: ObservationQueryService,
}

/// Every day from `first` to `last` inclusive, formatted as ISO dates
pub fn date_range(first: &str, last: &str) -> Vec<String> {
    let first = chrono::NaiveDate::parse_from_str(first, "%Y-%m-%d").unwrap();
    let last = chrono::NaiveDate::parse_from_str(last, "%Y-%m-%d").unwrap();
    first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect()
}

/// Two stations with overlapping dates plus a third with few rows.
///
/// WAIHEE is the most active station (4 rows, one before the window).
/// KANEOHE holds the latest date of the whole dataset, 2017-08-23.
pub async fn hawaii_sample() -> TestDataset {
    DatasetBuilder::new()
        .station(TestStations::WAIKIKI)
        .station(TestStations::KANEOHE)
        .station(TestStations::WAIHEE)
        .measurement(TestStations::WAIHEE.0, "2016-08-22", Some(0.10), 77.0)
        .measurement(TestStations::WAIHEE.0, "2016-08-23", Some(1.79), 77.0)
        .measurement(TestStations::KANEOHE.0, "2016-08-23", Some(0.05), 76.0)
        .measurement(TestStations::WAIKIKI.0, "2017-01-01", None, 62.0)
        .measurement(TestStations::WAIHEE.0, "2017-01-01", Some(0.29), 66.0)
        .measurement(TestStations::WAIHEE.0, "2017-08-18", None, 79.0)
        .measurement(TestStations::KANEOHE.0, "2017-08-23", Some(0.45), 82.0)
        .build()
        .await
}
