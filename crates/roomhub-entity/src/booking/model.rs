//! Booking entity model.

use chrono::{DateTime, Utc};
use roomhub_core::config::booking::ConflictMode;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::BookingStatus;

/// A reservation of one room by one user for `[start_time, end_time)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub note: Option<String>,
    #[serde(rename = "createTime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updateTime")]
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub user_id: i64,
    pub room_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub note: Option<String>,
}

impl Booking {
    /// Whether this booking blocks a new booking of `[start, end)` in the
    /// same room. Rejected and unbound bookings never block.
    pub fn blocks(&self, start: DateTime<Utc>, end: DateTime<Utc>, mode: ConflictMode) -> bool {
        self.status.is_active() && intervals_conflict(self.start_time, self.end_time, start, end, mode)
    }
}

/// Compare an existing interval with a requested one.
///
/// `Overlap` treats any intersection as a conflict (touching endpoints do
/// not intersect). `Contained` only flags an existing interval that covers
/// the whole requested interval.
pub fn intervals_conflict(
    existing_start: DateTime<Utc>,
    existing_end: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    mode: ConflictMode,
) -> bool {
    match mode {
        ConflictMode::Overlap => existing_start < end && existing_end > start,
        ConflictMode::Contained => existing_start <= start && existing_end >= end,
    }
}
