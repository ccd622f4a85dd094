//! Trailing-year window over ISO calendar dates

use crate::error::{ClimateError, Result};
use chrono::{Duration, NaiveDate};

/// Format of every date stored in the dataset
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the "last twelve months" window, in days
pub const TRAILING_WINDOW_DAYS: i64 = 365;

/// First date of the window ending at `most_recent`.
///
/// Subtracts [`TRAILING_WINDOW_DAYS`] calendar days, so a window crossing
/// 29 February starts one day later than the same day of the previous year.
pub fn window_start(most_recent: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(most_recent, ISO_DATE_FORMAT).map_err(|e| {
        ClimateError::parsing_error(format!("Invalid measurement date '{most_recent}': {e}"))
    })?;

    let start = date
        .checked_sub_signed(Duration::days(TRAILING_WINDOW_DAYS))
        .ok_or_else(|| {
            ClimateError::parsing_error(format!("Date '{most_recent}' is out of range"))
        })?;

    Ok(start.format(ISO_DATE_FORMAT).to_string())
}
