//! Aggregated usage rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Number of bookings a user made in a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserBookingCount {
    pub user_id: i64,
    pub username: String,
    pub booking_count: i64,
}

/// Number of bookings a room received in a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoomUsageCount {
    pub meeting_room_id: i64,
    pub meeting_room_name: String,
    pub used_count: i64,
}
