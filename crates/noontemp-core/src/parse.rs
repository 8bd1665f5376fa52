//! Timestamp decomposition and time-of-day parsing.
//!
//! Observation keys arrive as ISO-8601 strings such as
//! `2024-01-01T06:00:00Z`. They are split textually at the `T` separator:
//! the date part is kept as a calendar date and the time part is truncated
//! to `HH:MM`. Seconds and any offset suffix are discarded without timezone
//! conversion, so the anchors match the provider's wall-clock labels.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{NoonTempError, Result};

/// A timestamp split into its calendar date and minute-resolution time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampParts {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Split a combined date-time key into date and `HH:MM` time of day.
///
/// # Examples
///
/// ```
/// use noontemp_core::parse::decompose_timestamp;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let parts = decompose_timestamp("2024-01-01T11:00:00Z").unwrap();
/// assert_eq!(parts.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// assert_eq!(parts.time, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
/// ```
pub fn decompose_timestamp(input: &str) -> Result<TimestampParts> {
    let trimmed = input.trim();

    let (date_part, time_part) = trimmed.split_once('T').ok_or_else(|| {
        NoonTempError::MalformedTimestamp(format!(
            "'{}' has no date/time separator 'T'",
            input
        ))
    })?;

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| {
        NoonTempError::MalformedTimestamp(format!("Invalid date in '{}': {}", input, e))
    })?;

    let time = time_part
        .get(..5)
        .and_then(|hhmm| NaiveTime::parse_from_str(hhmm, "%H:%M").ok())
        .ok_or_else(|| {
            NoonTempError::MalformedTimestamp(format!(
                "Invalid time of day in '{}'. Expected HH:MM after 'T'",
                input
            ))
        })?;

    Ok(TimestampParts { date, time })
}

/// Parse an anchor time given as `HH:MM`.
pub fn parse_anchor_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|e| {
        NoonTempError::ParseError(format!(
            "Invalid time of day: '{}'. Expected HH:MM. Error: {}",
            input, e
        ))
    })
}
