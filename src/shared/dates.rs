//! Calendar date helpers
//!
//! Dates on the wire are either strict `YYYY-MM-DD` calendar days (Gantt
//! activities, card and task due dates) or full RFC 3339 timestamps (calendar
//! events, which also accept a bare day).

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use super::error::SharedError;

/// Parse a strict `YYYY-MM-DD` string.
///
/// Rejects anything that is not exactly ten characters in that layout, and
/// days that do not exist (`2023-02-29`).
pub fn parse_strict_date(value: &str) -> Result<NaiveDate, SharedError> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(SharedError::invalid_date(value));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| SharedError::invalid_date(value))
}

/// Parse the date of a calendar event: RFC 3339, or a strict day at midnight UTC.
pub fn parse_event_date(value: &str) -> Result<DateTime<Utc>, SharedError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    let day = parse_strict_date(value)?;
    Ok(start_of_day(day))
}

/// Half-open `[first day of month, first day of next month)` range.
pub fn month_bounds(year: i32, month: u32) -> Result<(DateTime<Utc>, DateTime<Utc>), SharedError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| SharedError::validation("month", format!("{year}-{month} is not a valid month")))?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| SharedError::validation("year", format!("{year} is out of range")))?;
    Ok((start_of_day(first), start_of_day(next)))
}

/// Half-open range covering the Monday-to-Sunday week that contains `day`.
pub fn week_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let offset = u64::from(day.weekday().num_days_from_monday());
    let monday = day.checked_sub_days(Days::new(offset)).unwrap_or(day);
    let next_monday = monday.checked_add_days(Days::new(7)).unwrap_or(monday);
    (start_of_day(monday), start_of_day(next_monday))
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::default()).and_utc()
}
