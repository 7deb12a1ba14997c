//! Conversions between the form's wall-clock input and stored instants.
//!
//! The input control holds a timezone-naive `YYYY-MM-DDTHH:MM` value. It is
//! interpreted in the caller's timezone on the way in and rendered in the
//! same timezone on the way out, so a value survives the round trip for any
//! offset.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

use crate::error::{Result, SchedulerError};

/// Format of the local date/time input control.
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Day-first date used by list pages.
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

const ACCEPTED_INPUT_FORMATS: [&str; 4] = [
    LOCAL_INPUT_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses the input control's value. Seconds and a space separator are
/// tolerated.
pub fn parse_local_input(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SchedulerError::invalid_datetime(input, "empty value"));
    }
    ACCEPTED_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| SchedulerError::invalid_datetime(input, "expected YYYY-MM-DDTHH:MM"))
}

/// Interprets a wall-clock input in `tz`. A time skipped by a DST jump is
/// rejected; a repeated time resolves to its earlier instant.
pub fn local_to_instant<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    let naive = parse_local_input(input)?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(SchedulerError::invalid_datetime(
            input,
            "local time does not exist in this timezone",
        )),
    }
}

/// Renders a stored instant for the input control.
pub fn instant_to_local<Tz>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant
        .with_timezone(tz)
        .format(LOCAL_INPUT_FORMAT)
        .to_string()
}

/// `DD.MM.YYYY` in `tz` for an ISO-8601 timestamp or date. Anything else is
/// returned unchanged.
pub fn format_display_date<Tz>(iso: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if let Ok(instant) = DateTime::parse_from_rfc3339(iso.trim()) {
        return instant
            .with_timezone(tz)
            .format(DISPLAY_DATE_FORMAT)
            .to_string();
    }
    match NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") {
        Ok(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => iso.to_string(),
    }
}
