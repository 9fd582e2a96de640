//! Closed time interval used for searches and statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An inclusive `[start, end]` interval in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Lower bound (inclusive).
    pub start: DateTime<Utc>,
    /// Upper bound (inclusive).
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::validation(
                "range start must not be later than range end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Whether `instant` lies inside the range.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}
