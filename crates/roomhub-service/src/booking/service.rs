//! Booking search, creation and status transitions.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use roomhub_core::config::booking::BookingConfig;
use roomhub_core::error::AppError;
use roomhub_core::traits::{CacheProvider, Mailer};
use roomhub_core::types::{PageRequest, PageResponse, TimeRange};
use roomhub_database::store::{BookingOutcome, BookingStore, UserStore};
use roomhub_entity::booking::{Booking, BookingDetail, BookingQuery, BookingStatus, NewBooking};

use crate::SUCCESS;
use crate::context::RequestContext;

/// Raw search filters as supplied by clients.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub username: Option<String>,
    pub room_name: Option<String>,
    pub room_location: Option<String>,
    pub range_start: Option<DateTime<Utc>>,
    pub range_end: Option<DateTime<Utc>>,
}

/// A booking request for the calling user.
#[derive(Debug, Clone)]
pub struct AddBooking {
    pub room_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub note: Option<String>,
}

/// Orchestrates bookings.
#[derive(Clone)]
pub struct BookingService {
    pub(super) bookings: Arc<dyn BookingStore>,
    /// Used to find the admin who receives urge reminders.
    pub(super) users: Arc<dyn UserStore>,
    pub(super) cache: Arc<dyn CacheProvider>,
    pub(super) mailer: Arc<dyn Mailer>,
    pub(super) config: BookingConfig,
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingStore>,
        users: Arc<dyn UserStore>,
        cache: Arc<dyn CacheProvider>,
        mailer: Arc<dyn Mailer>,
        config: BookingConfig,
    ) -> Self {
        Self {
            bookings,
            users,
            cache,
            mailer,
            config,
        }
    }

    /// Paginated booking search with booker and room embedded.
    ///
    /// A range start without an end searches the configured default window
    /// after the start. An end without a start is ignored.
    pub async fn find(
        &self,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<PageResponse<BookingDetail>, AppError> {
        let range = match filter.range_start {
            Some(start) => {
                let end = filter.range_end.unwrap_or_else(|| {
                    start + Duration::minutes(self.config.default_search_window_minutes)
                });
                Some(TimeRange::new(start, end)?)
            }
            None => None,
        };

        self.bookings
            .search(&BookingQuery {
                username: filter.username,
                room_name: filter.room_name,
                room_location: filter.room_location,
                range,
                page,
            })
            .await
    }

    /// Book a room for the calling user. The new booking is pending.
    pub async fn add(&self, ctx: &RequestContext, request: AddBooking) -> Result<Booking, AppError> {
        if request.start_time >= request.end_time {
            return Err(AppError::validation("start time must be before end time"));
        }

        let new_booking = NewBooking {
            user_id: ctx.user_id,
            room_id: request.room_id,
            start_time: request.start_time,
            end_time: request.end_time,
            note: request.note,
        };

        match self
            .bookings
            .create_if_available(&new_booking, self.config.conflict_mode)
            .await?
        {
            BookingOutcome::Created(booking) => {
                info!(
                    booking_id = booking.id,
                    room_id = booking.room_id,
                    user_id = booking.user_id,
                    "Booking created"
                );
                Ok(booking)
            }
            BookingOutcome::Conflict => {
                info!(room_id = request.room_id, "Booking rejected: slot taken");
                Err(AppError::conflict("slot already booked"))
            }
            BookingOutcome::RoomNotFound => {
                Err(AppError::validation("meeting room does not exist"))
            }
        }
    }

    /// Mark a booking approved.
    pub async fn apply(&self, id: i64) -> Result<String, AppError> {
        self.transition(id, BookingStatus::Approved).await
    }

    /// Mark a booking rejected.
    pub async fn reject(&self, id: i64) -> Result<String, AppError> {
        self.transition(id, BookingStatus::Rejected).await
    }

    /// Release a booking.
    pub async fn unbind(&self, id: i64) -> Result<String, AppError> {
        self.transition(id, BookingStatus::Unbound).await
    }

    /// Overwrite the status regardless of the current one.
    async fn transition(&self, id: i64, status: BookingStatus) -> Result<String, AppError> {
        if self.bookings.set_status(id, status).await? {
            info!(booking_id = id, ?status, "Booking status changed");
        } else {
            warn!(booking_id = id, ?status, "Status change for unknown booking");
        }
        Ok(SUCCESS.to_string())
    }
}
