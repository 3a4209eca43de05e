//! Timestamp display: ISO 8601 from the API → two-digit local clock time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 12-hour (`06:03 am`) or 24-hour (`06:03`) clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockStyle {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl fmt::Display for ClockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockStyle::TwelveHour => write!(f, "12h"),
            ClockStyle::TwentyFourHour => write!(f, "24h"),
        }
    }
}

/// Where and how times are shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStyle {
    pub tz: Tz,
    pub clock: ClockStyle,
}

impl Default for TimeStyle {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Asia::Kolkata,
            clock: ClockStyle::TwelveHour,
        }
    }
}

/// Parse an API timestamp. RFC 3339 with offset, or a naive
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Format a timestamp as local clock time. Empty input gives `""`; input
/// that is not a timestamp is shown trimmed and unchanged.
pub fn format_time(raw: &str, style: &TimeStyle) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match parse_timestamp(trimmed) {
        Some(utc) => {
            let local = utc.with_timezone(&style.tz);
            match style.clock {
                ClockStyle::TwelveHour => local.format("%I:%M %P").to_string(),
                ClockStyle::TwentyFourHour => local.format("%H:%M").to_string(),
            }
        }
        None => trimmed.to_string(),
    }
}

/// Today's calendar date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}
