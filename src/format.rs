//! Date and number formatting for display.
//!
//! The API sends local wall times without a zone (`2025-05-01T07:30:00`);
//! RFC 3339 values with an offset are converted to local time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().split('T').next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// `YYYY-MM-DD` part of a server timestamp, as sent.
pub fn date_part(raw: &str) -> String {
    raw.split('T').next().unwrap_or_default().to_string()
}

/// `HH:MM`, or empty when the timestamp does not parse.
pub fn time_of_day(raw: &str) -> String {
    parse_date_time(raw)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// "Thu, 1 May"
pub fn weekday_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%a, %-d %b").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// "1 May 2025"
pub fn long_date(raw: &str) -> String {
    parse_date_time(raw)
        .map(|dt| dt.format("%-d %b %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// "1 May"
pub fn day_month(raw: &str) -> String {
    parse_date_time(raw)
        .map(|dt| dt.format("%-d %b").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Whole numbers without decimals, everything else to one place.
pub fn calories(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}
