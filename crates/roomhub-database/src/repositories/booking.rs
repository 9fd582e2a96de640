//! Booking repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use roomhub_core::config::booking::ConflictMode;
use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::types::PageResponse;
use roomhub_entity::booking::{Booking, BookingDetail, BookingQuery, BookingStatus, NewBooking};
use roomhub_entity::meeting_room::MeetingRoom;
use roomhub_entity::user::UserDetail;

use crate::connection::like_pattern;
use crate::store::{BookingOutcome, BookingStore};

const SEARCH_FROM: &str = "FROM bookings b \
     JOIN users u ON u.id = b.user_id \
     JOIN meeting_rooms r ON r.id = b.room_id \
     WHERE ($1::text IS NULL OR u.username ILIKE $1) \
       AND ($2::text IS NULL OR r.name ILIKE $2) \
       AND ($3::text IS NULL OR r.location ILIKE $3) \
       AND ($4::timestamptz IS NULL OR b.start_time BETWEEN $4 AND $5)";

const DETAIL_COLUMNS: &str = "b.id, b.start_time, b.end_time, b.status, b.note, \
     b.created_at, b.updated_at, \
     u.id AS user_id, u.username, u.nick_name, u.email, u.head_pic, u.phone_number, \
     u.is_frozen, u.created_at AS user_created_at, \
     r.id AS room_id, r.name AS room_name, r.capacity AS room_capacity, \
     r.location AS room_location, r.equipment AS room_equipment, \
     r.description AS room_description, r.created_at AS room_created_at, \
     r.updated_at AS room_updated_at";

/// Flat join row of a booking with its user and room.
#[derive(Debug, FromRow)]
struct DetailRow {
    id: i64,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    status: BookingStatus,
    note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: i64,
    username: String,
    nick_name: String,
    email: String,
    head_pic: Option<String>,
    phone_number: Option<String>,
    is_frozen: bool,
    user_created_at: DateTime<Utc>,
    room_id: i64,
    room_name: String,
    room_capacity: i32,
    room_location: String,
    room_equipment: String,
    room_description: String,
    room_created_at: DateTime<Utc>,
    room_updated_at: DateTime<Utc>,
}

impl From<DetailRow> for BookingDetail {
    fn from(row: DetailRow) -> Self {
        Self {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            status: row.status,
            note: row.note,
            create_time: row.created_at,
            update_time: row.updated_at,
            user: UserDetail {
                id: row.user_id,
                username: row.username,
                nick_name: row.nick_name,
                email: row.email,
                head_pic: row.head_pic,
                phone_number: row.phone_number,
                is_frozen: row.is_frozen,
                create_time: row.user_created_at,
            },
            room: MeetingRoom {
                id: row.room_id,
                name: row.room_name,
                capacity: row.room_capacity,
                location: row.room_location,
                equipment: row.room_equipment,
                description: row.room_description,
                created_at: row.room_created_at,
                updated_at: row.room_updated_at,
            },
        }
    }
}

/// SQL predicate over `start_time`/`end_time` matching [`ConflictMode`],
/// with `$2` the requested start and `$3` the requested end.
fn conflict_predicate(mode: ConflictMode) -> &'static str {
    match mode {
        ConflictMode::Overlap => "start_time < $3 AND end_time > $2",
        ConflictMode::Contained => "start_time <= $2 AND end_time >= $3",
    }
}

/// Repository for booking persistence and search.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    async fn create_if_available(
        &self,
        data: &NewBooking,
        mode: ConflictMode,
    ) -> AppResult<BookingOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Row lock on the room serializes concurrent inserts for it.
        let room: Option<i64> =
            sqlx::query_scalar("SELECT id FROM meeting_rooms WHERE id = $1 FOR UPDATE")
                .bind(data.room_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock meeting room", e)
                })?;
        if room.is_none() {
            return Ok(BookingOutcome::RoomNotFound);
        }

        let conflicting: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS (SELECT 1 FROM bookings \
             WHERE room_id = $1 AND status IN ('pending', 'approved') AND {})",
            conflict_predicate(mode)
        ))
        .bind(data.room_id)
        .bind(data.start_time)
        .bind(data.end_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check booking conflicts", e)
        })?;
        if conflicting {
            return Ok(BookingOutcome::Conflict);
        }

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (user_id, room_id, start_time, end_time, status, note) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.room_id)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(BookingStatus::Pending)
        .bind(&data.note)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create booking", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;
        Ok(BookingOutcome::Created(booking))
    }

    async fn set_status(&self, id: i64, status: BookingStatus) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(status)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update booking status", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &BookingQuery) -> AppResult<PageResponse<BookingDetail>> {
        let username = like_pattern(query.username.as_deref());
        let room_name = like_pattern(query.room_name.as_deref());
        let room_location = like_pattern(query.room_location.as_deref());
        let range_start = query.range.map(|r| r.start);
        let range_end = query.range.map(|r| r.end);

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {SEARCH_FROM}"))
            .bind(&username)
            .bind(&room_name)
            .bind(&room_location)
            .bind(range_start)
            .bind(range_end)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;

        let rows = sqlx::query_as::<_, DetailRow>(&format!(
            "SELECT {DETAIL_COLUMNS} {SEARCH_FROM} ORDER BY b.id LIMIT $6 OFFSET $7"
        ))
        .bind(&username)
        .bind(&room_name)
        .bind(&room_location)
        .bind(range_start)
        .bind(range_end)
        .bind(query.page.limit() as i64)
        .bind(query.page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search bookings", e))?;

        Ok(PageResponse::new(
            rows.into_iter().map(BookingDetail::from).collect(),
            total as u64,
        ))
    }
}
