// Date handling for the Discovery API: whole-day UTC ranges and tool argument parsing

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;

// Upstream wants second precision with a literal Z, no fractional part
const UPSTREAM_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date '{input}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
pub struct DateParseError {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Widens `[start, end]` to whole UTC days: start of the start date through
/// the last second of the end date.
pub fn format_date_range<Tz1, Tz2>(start: &DateTime<Tz1>, end: &DateTime<Tz2>) -> DateRange
where
    Tz1: TimeZone,
    Tz2: TimeZone,
{
    DateRange {
        start: start_of_day(start),
        end: end_of_day(end),
    }
}

pub fn start_of_day<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    let day = date.with_timezone(&Utc).date_naive();
    day.and_time(NaiveTime::MIN)
        .and_utc()
        .format(UPSTREAM_TIMESTAMP_FORMAT)
        .to_string()
}

pub fn end_of_day<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    let day = date.with_timezone(&Utc).date_naive();
    // 23:59:59.999 always exists, the format drops the millis
    let last_milli = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    day.and_time(last_milli)
        .and_utc()
        .format(UPSTREAM_TIMESTAMP_FORMAT)
        .to_string()
}

/// Parses a tool date argument. A bare `YYYY-MM-DD` is midnight UTC of that day.
pub fn parse_date_input(input: &str) -> Result<DateTime<Utc>, DateParseError> {
    let trimmed = input.trim();
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| DateParseError {
            input: input.to_string(),
        })
}
