//! Storage layer for the observation dataset
//!
//! - `schema`: static declaration of the `station` and `measurement` tables
//! - `sqlite_client`: pooled, read-only access with per-operation connections

pub mod schema;
pub mod sqlite_client;

pub use sqlite_client::SqliteClient;
