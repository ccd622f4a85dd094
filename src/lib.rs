//! Read-only JSON API over a daily climate observations dataset
//!
//! The dataset is a SQLite file with a `station` table (station metadata)
//! and a `measurement` table (daily precipitation and temperature per
//! station). The crate serves five query shapes over it:
//!
//! - `/` lists the available routes
//! - `/api/v1.0/precipitation` maps each date of the last year to a precipitation value
//! - `/api/v1.0/stations` lists every station
//! - `/api/v1.0/tobs` returns last year's temperatures of the most active station
//! - `/api/v1.0/<start>[/<end>]` summarizes temperatures over a date range

pub mod config;
pub mod error;
pub mod http_transport;
pub mod logging;
pub mod services;
pub mod storage;

// Re-export main types for convenience
pub use config::ServerConfig;
pub use error::{ClimateError, Result};
pub use http_transport::{create_router, HttpServer};
pub use services::ObservationQueryService;
pub use storage::SqliteClient;
