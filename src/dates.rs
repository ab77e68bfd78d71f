// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date strings interpolated within an interval.
//!
//! Dates are read and written in the local time zone with strftime-style
//! patterns, and interpolated on their Unix timestamps.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::fmt::Write;

use crate::error::{Result, TimingError};

/// Pattern used by [`random_date`].
pub const RANDOM_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn invalid_date(input: &str, format: &str) -> TimingError {
    TimingError::InvalidDate {
        input: input.to_string(),
        format: format.to_string(),
    }
}

/// Parse a wall-clock string. Date-only patterns resolve to midnight.
fn parse_naive(input: &str, format: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, format)
        .or_else(|_| {
            NaiveDate::parse_from_str(input, format).map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_err(|_| invalid_date(input, format))
}

/// Parse `input` as a UTC timestamp.
pub(crate) fn parse_utc(input: &str, format: &str) -> Result<DateTime<Utc>> {
    parse_naive(input, format).map(|naive| naive.and_utc())
}

/// Parse `input` as local time; a wall-clock time skipped by a DST change
/// is an error, an ambiguous one resolves to the earlier instant.
fn parse_local(input: &str, format: &str) -> Result<DateTime<Local>> {
    let naive = parse_naive(input, format)?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| invalid_date(input, format))
}

/// The date a fraction `prop` of the way from `start` to `end`.
///
/// `prop = 0` gives `start`, `prop = 1` gives `end`, values outside
/// `[0, 1]` extrapolate.  Both bounds and the result use `format` and the
/// local time zone; the result is truncated to whole seconds.
///
/// ```
/// use transit_timing::str_time_prop;
///
/// let mid = str_time_prop("2020-01-01 00:00", "2020-01-02 00:00", "%Y-%m-%d %H:%M", 0.5);
/// assert_eq!(mid.as_deref(), Ok("2020-01-01 12:00"));
/// ```
pub fn str_time_prop(start: &str, end: &str, format: &str, prop: f64) -> Result<String> {
    let start_ts = parse_local(start, format)?.timestamp() as f64;
    let end_ts = parse_local(end, format)?.timestamp() as f64;

    let timestamp = start_ts + prop * (end_ts - start_ts);
    let out_of_range = || invalid_date(&format!("{start} + {prop} · ({end} − {start})"), format);
    if !timestamp.is_finite() || timestamp.abs() >= i64::MAX as f64 {
        return Err(out_of_range());
    }

    let datetime = DateTime::from_timestamp(timestamp.floor() as i64, 0)
        .ok_or_else(|| out_of_range())?
        .with_timezone(&Local);

    let mut formatted = String::new();
    write!(formatted, "{}", datetime.format(format)).map_err(|_| out_of_range())?;
    Ok(formatted)
}

/// [`str_time_prop`] with [`RANDOM_DATE_FORMAT`].
pub fn random_date(start: &str, end: &str, prop: f64) -> Result<String> {
    str_time_prop(start, end, RANDOM_DATE_FORMAT, prop)
}
