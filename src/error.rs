//! Error types for the climate observations service
//!
//! Every failure the service can hit is a server-side fault: the dataset is
//! read-only and request parameters are never rejected. Errors therefore carry
//! a machine-readable code and category but always surface as HTTP 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ClimateError>;

/// Error types for climate observation operations
#[derive(Error, Debug)]
pub enum ClimateError {
    /// Database errors (connection, pool acquisition, query execution)
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored data that cannot be interpreted
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structured error code for machine-readable error handling
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Configuration errors (1200-1299)
    ConfigurationInvalid,

    // Data errors (1400-1499)
    DataCorrupted,

    // Service errors (1600-1699)
    DatabaseUnavailable,

    // Internal errors (1900-1999)
    InternalError,
}

impl ErrorCode {
    /// Get numeric error code
    pub fn as_number(&self) -> u32 {
        match self {
            ErrorCode::ConfigurationInvalid => 1202,
            ErrorCode::DataCorrupted => 1404,
            ErrorCode::DatabaseUnavailable => 1604,
            ErrorCode::InternalError => 1901,
        }
    }

    /// Coarse category used in API error bodies and logs
    pub fn category(&self) -> &'static str {
        match self {
            ErrorCode::ConfigurationInvalid => "configuration",
            ErrorCode::DataCorrupted => "data",
            ErrorCode::DatabaseUnavailable => "service",
            ErrorCode::InternalError => "internal",
        }
    }
}

impl ClimateError {
    /// Create a database error
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parsing error
    pub fn parsing_error<S: Into<String>>(msg: S) -> Self {
        Self::Parsing(msg.into())
    }

    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            ClimateError::Database(_) => ErrorCode::DatabaseUnavailable,
            ClimateError::Config(_) => ErrorCode::ConfigurationInvalid,
            ClimateError::Parsing(_) => ErrorCode::DataCorrupted,
            ClimateError::Json(_) | ClimateError::Io(_) => ErrorCode::InternalError,
        }
    }

    /// Message safe to hand to API clients.
    ///
    /// Database and I/O errors can embed the dataset location, so any token
    /// that looks like a filesystem path is masked.
    pub fn sanitized_message(&self) -> String {
        self.to_string()
            .split(' ')
            .map(|word| {
                let trimmed = word.trim_matches(|c: char| c == '"' || c == '\'' || c == ',');
                if trimmed.contains('/') && !trimmed.starts_with("/api/") {
                    "[path]"
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// JSON body returned to API clients
    pub fn to_api_error(&self) -> serde_json::Value {
        let code = self.to_error_code();
        serde_json::json!({
            "error": {
                "code": code.as_number(),
                "category": code.category(),
                "message": self.sanitized_message(),
            }
        })
    }
}

impl From<sqlx::Error> for ClimateError {
    fn from(err: sqlx::Error) -> Self {
        ClimateError::Database(err.to_string())
    }
}

impl From<config::ConfigError> for ClimateError {
    fn from(err: config::ConfigError) -> Self {
        ClimateError::Config(err.to_string())
    }
}

impl IntoResponse for ClimateError {
    fn into_response(self) -> Response {
        tracing::error!(
            code = self.to_error_code().as_number(),
            category = self.to_error_code().category(),
            "Request failed: {}",
            self
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self.to_api_error())).into_response()
    }
}
