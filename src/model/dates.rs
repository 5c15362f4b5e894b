//! Timestamp parsing and day arithmetic.

use crate::Result;
use anyhow::bail;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Parses the timestamp formats found in sponsorship exports:
/// - RFC 3339, e.g. `2025-06-01T12:00:00Z`
/// - `2025-06-01 12:00:00 UTC` or `2025-06-01 12:00:00 +0200`
/// - a bare date, `2025-06-01`, taken as midnight UTC
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = s.strip_suffix(" UTC").unwrap_or(s);
    if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }
    bail!("Invalid timestamp '{s}'")
}

/// The number of whole days between `timestamp` and `now`, rounded down. Timestamps in the future
/// produce negative values.
pub fn days_since(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - timestamp).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Renders e.g. `since Jun 2025`.
pub fn since_when(timestamp: DateTime<Utc>) -> String {
    format!("since {}", timestamp.format("%b %Y"))
}
