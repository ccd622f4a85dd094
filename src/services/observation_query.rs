//! Query service over the observation dataset
//!
//! Each operation borrows one pooled connection, runs its read queries and
//! gives the connection back before shaping the response. Rows are consumed
//! in the order SQLite returns them; no operation adds an ORDER BY that the
//! endpoint does not call for.

use super::date_window::window_start;
use super::models::{
    PrecipitationByDate, RouteListing, StationEntry, TemperatureStats, TobsEntry,
};
use crate::error::Result;
use crate::storage::schema::{
    PrecipitationRow, StationActivity, StationRow, TemperatureAggregate, TobsRow,
};
use crate::storage::SqliteClient;
use sqlx::SqliteConnection;
use tracing::debug;

const MOST_RECENT_DATE_SQL: &str = "SELECT MAX(date) FROM measurement";

const PRECIPITATION_SINCE_SQL: &str = "SELECT date, prcp FROM measurement WHERE date >= ?1";

const STATIONS_SQL: &str = "SELECT station, name FROM station";

const MOST_ACTIVE_STATION_SQL: &str = r#"
    SELECT station, COUNT(station) AS observations
    FROM measurement
    GROUP BY station
    ORDER BY observations DESC
    LIMIT 1
"#;

const STATION_TOBS_SINCE_SQL: &str =
    "SELECT date, tobs FROM measurement WHERE station = ?1 AND date >= ?2";

const TEMPERATURE_STATS_FROM_SQL: &str = r#"
    SELECT CAST(MIN(tobs) AS REAL) AS min_tobs,
           AVG(tobs) AS avg_tobs,
           CAST(MAX(tobs) AS REAL) AS max_tobs
    FROM measurement
    WHERE date >= ?1
"#;

const TEMPERATURE_STATS_BETWEEN_SQL: &str = r#"
    SELECT CAST(MIN(tobs) AS REAL) AS min_tobs,
           AVG(tobs) AS avg_tobs,
           CAST(MAX(tobs) AS REAL) AS max_tobs
    FROM measurement
    WHERE date >= ?1 AND date <= ?2
"#;

/// Read-only queries behind the observation endpoints
#[derive(Debug, Clone)]
pub struct ObservationQueryService {
    client: SqliteClient,
}

impl ObservationQueryService {
    pub fn new(client: SqliteClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SqliteClient {
        &self.client
    }

    /// Paths served by the API
    pub fn list_routes(&self) -> RouteListing {
        RouteListing::default()
    }

    /// Precipitation for the twelve months up to the latest measurement.
    ///
    /// Several stations report on the same day, and only the row read last
    /// for a date is kept.
    pub async fn recent_precipitation(&self) -> Result<PrecipitationByDate> {
        let rows = {
            let mut conn = self.client.acquire().await?;

            let Some(since) = trailing_window_start(&mut conn).await? else {
                debug!("No measurements; precipitation is empty");
                return Ok(PrecipitationByDate::new());
            };

            sqlx::query_as::<_, PrecipitationRow>(PRECIPITATION_SINCE_SQL)
                .bind(since.as_str())
                .fetch_all(&mut *conn)
                .await?
        };

        let mut by_date = PrecipitationByDate::new();
        for row in rows {
            by_date.insert(row.date, row.prcp);
        }

        debug!("Precipitation covers {} dates", by_date.len());
        Ok(by_date)
    }

    /// Every station, in table order
    pub async fn list_stations(&self) -> Result<Vec<StationEntry>> {
        let rows = {
            let mut conn = self.client.acquire().await?;
            sqlx::query_as::<_, StationRow>(STATIONS_SQL)
                .fetch_all(&mut *conn)
                .await?
        };

        Ok(rows
            .into_iter()
            .map(|row| StationEntry {
                station: row.station,
                name: row.name,
            })
            .collect())
    }

    /// Temperature observations of the station with the most measurements,
    /// limited to the twelve months before the latest measurement of any
    /// station.
    pub async fn most_active_station_temps(&self) -> Result<Vec<TobsEntry>> {
        let rows = {
            let mut conn = self.client.acquire().await?;

            let Some(most_active) =
                sqlx::query_as::<_, StationActivity>(MOST_ACTIVE_STATION_SQL)
                    .fetch_optional(&mut *conn)
                    .await?
            else {
                debug!("No measurements; no most active station");
                return Ok(Vec::new());
            };

            let Some(since) = trailing_window_start(&mut conn).await? else {
                return Ok(Vec::new());
            };

            debug!(
                station = %most_active.station,
                observations = most_active.observations,
                since = %since,
                "Selected most active station"
            );

            sqlx::query_as::<_, TobsRow>(STATION_TOBS_SINCE_SQL)
                .bind(most_active.station.as_str())
                .bind(since.as_str())
                .fetch_all(&mut *conn)
                .await?
        };

        Ok(rows
            .into_iter()
            .map(|row| TobsEntry {
                date: row.date,
                tobs: row.tobs,
            })
            .collect())
    }

    /// MIN/AVG/MAX temperature from `start`, up to and including `end` when
    /// given.
    ///
    /// Bounds are compared as plain strings, so a malformed date just selects
    /// nothing. The result is always a single-element list.
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<Vec<TemperatureStats>> {
        let end = end.filter(|e| !e.is_empty());

        let aggregate = {
            let mut conn = self.client.acquire().await?;
            match end {
                None => {
                    sqlx::query_as::<_, TemperatureAggregate>(TEMPERATURE_STATS_FROM_SQL)
                        .bind(start)
                        .fetch_one(&mut *conn)
                        .await?
                }
                Some(end) => {
                    sqlx::query_as::<_, TemperatureAggregate>(TEMPERATURE_STATS_BETWEEN_SQL)
                        .bind(start)
                        .bind(end)
                        .fetch_one(&mut *conn)
                        .await?
                }
            }
        };

        debug!(start, end = ?end, ?aggregate, "Computed temperature stats");

        Ok(vec![TemperatureStats {
            min: aggregate.min_tobs,
            avg: aggregate.avg_tobs,
            max: aggregate.max_tobs,
        }])
    }
}

/// Start of the trailing window, or `None` when there are no measurements
async fn trailing_window_start(conn: &mut SqliteConnection) -> Result<Option<String>> {
    let most_recent: Option<String> = sqlx::query_scalar(MOST_RECENT_DATE_SQL)
        .fetch_one(&mut *conn)
        .await?;

    match most_recent {
        Some(date) => {
            let since = window_start(&date)?;
            debug!(most_recent = %date, since = %since, "Derived trailing window");
            Ok(Some(since))
        }
        None => Ok(None),
    }
}
