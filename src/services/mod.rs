//! Observation query services
//!
//! - `date_window`: trailing-year window arithmetic over ISO dates
//! - `models`: JSON response shapes
//! - `observation_query`: the read queries behind each endpoint

pub mod date_window;
pub mod models;
pub mod observation_query;

pub use observation_query::ObservationQueryService;
