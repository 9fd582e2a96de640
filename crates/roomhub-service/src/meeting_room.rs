//! Meeting room inventory management.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use roomhub_core::error::AppError;
use roomhub_core::types::PageResponse;
use roomhub_database::store::MeetingRoomStore;
use roomhub_entity::meeting_room::{
    CreateMeetingRoom, MeetingRoom, MeetingRoomQuery, UpdateMeetingRoom,
};

use crate::SUCCESS;

const NOT_FOUND: &str = "meeting room does not exist";

/// CRUD over meeting rooms.
#[derive(Debug, Clone)]
pub struct MeetingRoomService {
    rooms: Arc<dyn MeetingRoomStore>,
}

impl MeetingRoomService {
    pub fn new(rooms: Arc<dyn MeetingRoomStore>) -> Self {
        Self { rooms }
    }

    pub async fn list(
        &self,
        query: &MeetingRoomQuery,
    ) -> Result<PageResponse<MeetingRoom>, AppError> {
        self.rooms.search(query).await
    }

    /// Add a room. Names are unique.
    pub async fn create(&self, data: &CreateMeetingRoom) -> Result<MeetingRoom, AppError> {
        if self.rooms.find_by_name(&data.name).await?.is_some() {
            return Err(AppError::conflict("meeting room name already exists"));
        }
        let room = self.rooms.create(data).await?;
        info!(room_id = room.id, name = %room.name, "Meeting room created");
        Ok(room)
    }

    /// Replace a room's fields. Empty description or equipment keep the
    /// stored value.
    pub async fn update(&self, update: &UpdateMeetingRoom) -> Result<String, AppError> {
        let mut room = self
            .rooms
            .find_by_id(update.id)
            .await?
            .ok_or_else(|| AppError::validation(NOT_FOUND))?;

        room.apply(update, Utc::now());
        self.rooms.update(&room).await?;

        info!(room_id = room.id, "Meeting room updated");
        Ok(SUCCESS.to_string())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<MeetingRoom, AppError> {
        self.rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::validation(NOT_FOUND))
    }

    /// Remove a room together with its bookings.
    pub async fn delete(&self, id: i64) -> Result<String, AppError> {
        if self.rooms.delete(id).await? {
            info!(room_id = id, "Meeting room deleted");
        }
        Ok(SUCCESS.to_string())
    }
}
