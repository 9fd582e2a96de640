//! Booking statistics queries.

use async_trait::async_trait;
use sqlx::PgPool;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::types::TimeRange;
use roomhub_entity::statistic::{RoomUsageCount, UserBookingCount};

use crate::store::StatisticStore;

/// Read-only aggregation queries over bookings.
#[derive(Debug, Clone)]
pub struct StatisticRepository {
    pool: PgPool,
}

impl StatisticRepository {
    /// Create a new statistic repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatisticStore for StatisticRepository {
    async fn user_booking_counts(&self, range: &TimeRange) -> AppResult<Vec<UserBookingCount>> {
        sqlx::query_as::<_, UserBookingCount>(
            "SELECT u.id AS user_id, u.username, COUNT(b.id) AS booking_count \
             FROM bookings b \
             JOIN users u ON u.id = b.user_id \
             WHERE b.start_time BETWEEN $1 AND $2 \
             GROUP BY u.id, u.username \
             ORDER BY booking_count DESC, u.id",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count bookings per user", e)
        })
    }

    async fn room_usage_counts(&self, range: &TimeRange) -> AppResult<Vec<RoomUsageCount>> {
        sqlx::query_as::<_, RoomUsageCount>(
            "SELECT r.id AS meeting_room_id, r.name AS meeting_room_name, \
                    COUNT(b.id) AS used_count \
             FROM bookings b \
             JOIN meeting_rooms r ON r.id = b.room_id \
             WHERE b.start_time BETWEEN $1 AND $2 \
             GROUP BY r.id, r.name \
             ORDER BY used_count DESC, r.id",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count bookings per room", e)
        })
    }
}
