//! Response shapes of the observation endpoints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Path templates advertised by the index route, in display order
pub const AVAILABLE_ROUTES: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

/// Body of the index route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteListing {
    #[serde(rename = "Available Routes")]
    pub available_routes: Vec<String>,
}

impl Default for RouteListing {
    fn default() -> Self {
        Self {
            available_routes: AVAILABLE_ROUTES.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Precipitation keyed by date.
///
/// Built by inserting rows in query order, so one value survives per date.
/// Keys serialize in sorted order.
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationEntry {
    pub station: String,
    pub name: String,
}

/// One temperature observation of the most active station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TobsEntry {
    pub date: String,
    pub tobs: f64,
}

/// Temperature summary over a date range; fields are null when nothing matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    #[serde(rename = "MIN TEMPERATURE")]
    pub min: Option<f64>,
    #[serde(rename = "AVG TEMPERATURE")]
    pub avg: Option<f64>,
    #[serde(rename = "MAX TEMPERATURE")]
    pub max: Option<f64>,
}
