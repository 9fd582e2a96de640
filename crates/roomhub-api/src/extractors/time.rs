//! Lenient instant parsing for query parameters.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use roomhub_core::error::AppError;

/// Parse milliseconds since the epoch, an RFC 3339 timestamp, or a
/// `YYYY-MM-DD` date (midnight UTC).
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    let invalid = || AppError::validation(format!("invalid time: {raw}"));

    if let Ok(ms) = raw.parse::<i64>() {
        return from_millis(ms).ok_or_else(invalid);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(invalid)
}

/// Instant from milliseconds since the epoch.
pub fn from_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Serde adapter for request fields holding epoch milliseconds.
pub fn deserialize_millis<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = i64::deserialize(deserializer)?;
    from_millis(ms).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {ms}")))
}
