//! Booking search result row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::BookingStatus;
use crate::meeting_room::MeetingRoom;
use crate::user::UserDetail;

/// A booking with its booker (password stripped) and room embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub note: Option<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    pub user: UserDetail,
    pub room: MeetingRoom,
}
