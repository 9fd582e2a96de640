//! Meeting room entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRoom {
    /// Unique room identifier.
    pub id: i64,
    /// Unique room name.
    pub name: String,
    /// Number of seats.
    pub capacity: i32,
    /// Where the room is.
    pub location: String,
    /// Installed equipment, free text.
    pub equipment: String,
    /// Free-text description.
    pub description: String,
    /// When the room was created.
    #[serde(rename = "createTime")]
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    #[serde(rename = "updateTime")]
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeetingRoom {
    pub name: String,
    pub capacity: i32,
    pub location: String,
    pub equipment: String,
    pub description: String,
}

/// Full replacement of a room's editable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMeetingRoom {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    pub location: String,
    pub equipment: String,
    pub description: String,
}

impl MeetingRoom {
    /// Apply an update. Name, capacity and location are always replaced;
    /// description and equipment only when the new value is non-empty.
    pub fn apply(&mut self, update: &UpdateMeetingRoom, now: DateTime<Utc>) {
        self.name = update.name.clone();
        self.capacity = update.capacity;
        self.location = update.location.clone();
        if !update.description.is_empty() {
            self.description = update.description.clone();
        }
        if !update.equipment.is_empty() {
            self.equipment = update.equipment.clone();
        }
        self.updated_at = now;
    }
}
