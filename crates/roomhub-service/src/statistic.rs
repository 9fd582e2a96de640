//! Booking statistics over a time window.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use roomhub_core::error::AppError;
use roomhub_core::types::TimeRange;
use roomhub_database::store::StatisticStore;
use roomhub_entity::statistic::{RoomUsageCount, UserBookingCount};

/// Aggregations for the admin dashboard.
#[derive(Debug, Clone)]
pub struct StatisticService {
    statistics: Arc<dyn StatisticStore>,
}

impl StatisticService {
    pub fn new(statistics: Arc<dyn StatisticStore>) -> Self {
        Self { statistics }
    }

    /// Bookings per user starting inside `[start, end]`, busiest first.
    pub async fn user_booking_count(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<UserBookingCount>, AppError> {
        let range = TimeRange::new(start, end)?;
        self.statistics.user_booking_counts(&range).await
    }

    /// Bookings per room starting inside `[start, end]`.
    pub async fn meeting_room_used_counts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RoomUsageCount>, AppError> {
        let range = TimeRange::new(start, end)?;
        self.statistics.room_usage_counts(&range).await
    }
}
