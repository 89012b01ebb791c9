// Date utility functions
// Local wall-clock resolution shared by the grid, forms and CLI

use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike, Utc,
};

/// Resolve `date@hour:minute` in the local timezone.
///
/// Ambiguous wall-clock times (DST fall-back) resolve to the earlier
/// instant. Non-existent times (DST spring-forward gap) are interpreted as
/// UTC and converted.
pub fn local_datetime(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Local> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
    resolve_local(date.and_time(time))
}

pub fn resolve_local(naive: NaiveDateTime) -> DateTime<Local> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(a, b) => a.min(b),
        LocalResult::None => Utc.from_utc_datetime(&naive).with_timezone(&Local),
    }
}

pub fn is_same_day(instant: DateTime<Local>, date: NaiveDate) -> bool {
    instant.date_naive() == date
}

/// The next :00 or :30 boundary strictly after the current minute.
pub fn next_half_hour(now: DateTime<Local>) -> DateTime<Local> {
    let truncated = now
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(now);

    if truncated.minute() < 30 {
        truncated + Duration::minutes(30 - i64::from(truncated.minute()))
    } else {
        truncated + Duration::minutes(60 - i64::from(truncated.minute()))
    }
}

/// Parse `YYYY-MM-DD HH:MM` (local) or an RFC 3339 timestamp.
pub fn parse_local_datetime(value: &str) -> Result<DateTime<Local>, String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Local));
    }

    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(resolve_local(naive));
        }
    }

    Err(format!(
        "Invalid date-time '{}'. Expected YYYY-MM-DD HH:MM or RFC 3339",
        value
    ))
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Expected YYYY-MM-DD", value))
}
