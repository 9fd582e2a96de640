//! Store traits consumed by the service layer.
//!
//! Each trait has a PostgreSQL implementation in [`crate::repositories`] and
//! an in-memory implementation in [`crate::memory`].

use async_trait::async_trait;

use roomhub_core::config::booking::ConflictMode;
use roomhub_core::result::AppResult;
use roomhub_core::types::{PageResponse, TimeRange};
use roomhub_entity::access::{Role, RoleWithPermissions};
use roomhub_entity::booking::{Booking, BookingDetail, BookingQuery, BookingStatus, NewBooking};
use roomhub_entity::meeting_room::{CreateMeetingRoom, MeetingRoom, MeetingRoomQuery};
use roomhub_entity::statistic::{RoomUsageCount, UserBookingCount};
use roomhub_entity::user::{CreateUser, UpdateProfile, User, UserQuery};

/// Result of an atomic check-and-insert of a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// The slot was free and the booking was stored.
    Created(Booking),
    /// An active booking of the same room conflicts.
    Conflict,
    /// The referenced room does not exist.
    RoomNotFound,
}

/// Account persistence.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key in either partition.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by username in either partition.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by username within one login partition.
    async fn find_account(&self, username: &str, is_admin: bool) -> AppResult<Option<User>>;

    /// Find a user by id within one login partition.
    async fn find_account_by_id(&self, id: i64, is_admin: bool) -> AppResult<Option<User>>;

    /// Return the oldest admin account, if any.
    async fn find_first_admin(&self) -> AppResult<Option<User>>;

    /// Insert a user. A taken username is a conflict.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Replace the password hash. Returns `false` when the user is unknown.
    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<bool>;

    /// Overwrite the profile fields that are present.
    async fn update_profile(&self, data: &UpdateProfile) -> AppResult<bool>;

    /// Set the frozen flag. Returns `false` when the user is unknown.
    async fn set_frozen(&self, id: i64, frozen: bool) -> AppResult<bool>;

    /// Paginated substring search.
    async fn search(&self, query: &UserQuery) -> AppResult<PageResponse<User>>;
}

/// Role and permission persistence.
#[async_trait]
pub trait RoleStore: Send + Sync + std::fmt::Debug + 'static {
    /// The user's roles in assignment order, each with its permissions in
    /// assignment order.
    async fn roles_with_permissions(&self, user_id: i64) -> AppResult<Vec<RoleWithPermissions>>;

    /// Create the role if missing and make sure it carries every listed
    /// permission code (permissions are created on demand).
    async fn ensure_role(&self, name: &str, permission_codes: &[String]) -> AppResult<Role>;

    /// Attach a role to a user. Assigning twice is a no-op.
    async fn assign_role(&self, user_id: i64, role_id: i64) -> AppResult<()>;
}

/// Meeting room persistence.
#[async_trait]
pub trait MeetingRoomStore: Send + Sync + std::fmt::Debug + 'static {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<MeetingRoom>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<MeetingRoom>>;

    /// Insert a room. A taken name is a conflict.
    async fn create(&self, data: &CreateMeetingRoom) -> AppResult<MeetingRoom>;

    /// Persist every editable column of `room`.
    async fn update(&self, room: &MeetingRoom) -> AppResult<MeetingRoom>;

    /// Delete a room and its bookings. Returns `false` when unknown.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Paginated search.
    async fn search(&self, query: &MeetingRoomQuery) -> AppResult<PageResponse<MeetingRoom>>;
}

/// Booking persistence.
#[async_trait]
pub trait BookingStore: Send + Sync + std::fmt::Debug + 'static {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Booking>>;

    /// Check the room for conflicting active bookings and insert a pending
    /// booking, atomically with respect to other inserts for the same room.
    async fn create_if_available(
        &self,
        data: &NewBooking,
        mode: ConflictMode,
    ) -> AppResult<BookingOutcome>;

    /// Overwrite the status. Returns `false` when the booking is unknown.
    async fn set_status(&self, id: i64, status: BookingStatus) -> AppResult<bool>;

    /// Paginated search with booker and room embedded.
    async fn search(&self, query: &BookingQuery) -> AppResult<PageResponse<BookingDetail>>;
}

/// Aggregations over bookings.
#[async_trait]
pub trait StatisticStore: Send + Sync + std::fmt::Debug + 'static {
    /// Bookings per user whose start time falls inside `range`.
    async fn user_booking_counts(&self, range: &TimeRange) -> AppResult<Vec<UserBookingCount>>;

    /// Bookings per room whose start time falls inside `range`.
    async fn room_usage_counts(&self, range: &TimeRange) -> AppResult<Vec<RoomUsageCount>>;
}
