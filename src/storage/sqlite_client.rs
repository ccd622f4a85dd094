//! SQLite client for the observation dataset
//!
//! Owns a connection pool over the dataset file. Callers borrow one
//! connection per operation through [`SqliteClient::acquire`]; the returned
//! guard goes back to the pool when dropped, whichever way the operation exits.

use super::schema::TABLES;
use crate::config::DatabaseConfig;
use crate::error::{ClimateError, Result};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use tracing::{debug, info};

/// Pooled SQLite client over the observation dataset
#[derive(Debug, Clone)]
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    /// Open the dataset described by `config` and verify its schema
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!(
            "Opening observation dataset at {} (read_only={})",
            config.path.display(),
            config.read_only
        );

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .read_only(config.read_only)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| ClimateError::database(format!("Failed to open dataset: {e}")))?;

        let client = Self { pool };
        client.verify_schema().await?;

        Ok(client)
    }

    /// Check the static table declaration against the opened file
    pub async fn verify_schema(&self) -> Result<()> {
        let mut conn = self.acquire().await?;

        for table in TABLES {
            let probe = table.probe_sql();
            sqlx::query(&probe)
                .fetch_all(&mut *conn)
                .await
                .map_err(|e| {
                    ClimateError::database(format!(
                        "Table '{}' does not match the expected schema: {e}",
                        table.name
                    ))
                })?;
            debug!("Verified table '{}'", table.name);
        }

        info!("Dataset schema verified");
        Ok(())
    }

    /// Borrow a connection for the duration of one operation
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| ClimateError::database(format!("Failed to acquire connection: {e}")))
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Dataset connections closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
