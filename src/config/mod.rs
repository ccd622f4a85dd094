//! Configuration management for the climate observations server
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `CLIMATE__SECTION__KEY` environment variables. CLI flags are applied on top
//! by the binary.

use crate::error::{ClimateError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "CLIMATE";

/// Separator between prefix, section and key in environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ServerConfig {
    /// Observation dataset configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// SQLite dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite file holding the `station` and `measurement` tables
    pub path: PathBuf,

    /// Open connections read-only
    pub read_only: bool,

    /// Upper bound on pooled connections
    pub max_connections: u32,

    /// How long a request waits for a pooled connection
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Resources/hawaii.sqlite"),
            read_only: true,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Attach a permissive CORS layer
    pub enable_cors: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            enable_cors: false,
        }
    }
}

impl HttpConfig {
    /// Resolve the listen address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ClimateError::config(format!("Invalid listen address: {e}")))
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, an optional TOML file and the environment
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&ServerConfig::default())?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = config_file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ClimateError::config("Database path cannot be empty"));
        }

        if self.database.max_connections == 0 {
            return Err(ClimateError::config(
                "database.max_connections must be greater than zero",
            ));
        }

        if self.database.acquire_timeout.is_zero() {
            return Err(ClimateError::config(
                "database.acquire_timeout must be greater than zero",
            ));
        }

        if self.http.port == 0 {
            return Err(ClimateError::config("http.port must be greater than zero"));
        }

        self.http.socket_addr()?;

        Ok(())
    }
}
