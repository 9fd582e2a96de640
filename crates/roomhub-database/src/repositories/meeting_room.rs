//! Meeting room repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::types::PageResponse;
use roomhub_entity::meeting_room::{CreateMeetingRoom, MeetingRoom, MeetingRoomQuery};

use crate::connection::like_pattern;
use crate::store::MeetingRoomStore;

const SEARCH_FILTER: &str = "($1::text IS NULL OR name ILIKE $1) \
     AND ($2::int IS NULL OR capacity = $2) \
     AND ($3::text IS NULL OR equipment ILIKE $3)";

/// Repository for meeting room CRUD and query operations.
#[derive(Debug, Clone)]
pub struct MeetingRoomRepository {
    pool: PgPool,
}

impl MeetingRoomRepository {
    /// Create a new meeting room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_name_conflict(e: sqlx::Error, message: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("meeting_rooms_name_key") =>
        {
            AppError::conflict("meeting room name already exists")
        }
        _ => AppError::with_source(ErrorKind::Database, message, e),
    }
}

#[async_trait]
impl MeetingRoomStore for MeetingRoomRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<MeetingRoom>> {
        sqlx::query_as::<_, MeetingRoom>("SELECT * FROM meeting_rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find meeting room", e))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<MeetingRoom>> {
        sqlx::query_as::<_, MeetingRoom>("SELECT * FROM meeting_rooms WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find meeting room by name", e)
            })
    }

    async fn create(&self, data: &CreateMeetingRoom) -> AppResult<MeetingRoom> {
        sqlx::query_as::<_, MeetingRoom>(
            "INSERT INTO meeting_rooms (name, capacity, location, equipment, description) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(data.capacity)
        .bind(&data.location)
        .bind(&data.equipment)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, "Failed to create meeting room"))
    }

    async fn update(&self, room: &MeetingRoom) -> AppResult<MeetingRoom> {
        sqlx::query_as::<_, MeetingRoom>(
            "UPDATE meeting_rooms SET name = $2, capacity = $3, location = $4, \
                equipment = $5, description = $6, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(room.id)
        .bind(&room.name)
        .bind(room.capacity)
        .bind(&room.location)
        .bind(&room.equipment)
        .bind(&room.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, "Failed to update meeting room"))?
        .ok_or_else(|| AppError::validation("meeting room does not exist"))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM meeting_rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete meeting room", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &MeetingRoomQuery) -> AppResult<PageResponse<MeetingRoom>> {
        let name = like_pattern(query.name.as_deref());
        let equipment = like_pattern(query.equipment.as_deref());

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM meeting_rooms WHERE {SEARCH_FILTER}"
        ))
        .bind(&name)
        .bind(query.capacity)
        .bind(&equipment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count meeting rooms", e))?;

        let rooms = sqlx::query_as::<_, MeetingRoom>(&format!(
            "SELECT * FROM meeting_rooms WHERE {SEARCH_FILTER} ORDER BY id LIMIT $4 OFFSET $5"
        ))
        .bind(&name)
        .bind(query.capacity)
        .bind(&equipment)
        .bind(query.page.limit() as i64)
        .bind(query.page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to search meeting rooms", e)
        })?;

        Ok(PageResponse::new(rooms, total as u64))
    }
}
