//! Request DTOs with validation. Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use roomhub_entity::meeting_room::{CreateMeetingRoom, UpdateMeetingRoom};
use roomhub_service::booking::AddBooking;
use roomhub_service::user::{RegisterUser, UpdatePassword, UpdateUser};

use crate::extractors::time::deserialize_millis;

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[serde(alias = "nickname")]
    #[validate(length(min = 1, message = "nickname must not be empty"))]
    pub nick_name: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters long"))]
    pub password: String,
    #[validate(email(message = "email address is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "captcha must not be empty"))]
    pub captcha: String,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            nick_name: req.nick_name,
            email: req.email,
            captcha: req.captcha,
        }
    }
}

/// `?address=` of the captcha endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddressQuery {
    #[validate(email(message = "email address is invalid"))]
    pub address: String,
}

/// `?refreshToken=` of the refresh endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshQuery {
    pub refresh_token: String,
}

/// Password change request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(email(message = "email address is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "captcha must not be empty"))]
    pub captcha: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters long"))]
    pub password: String,
}

impl From<UpdatePasswordRequest> for UpdatePassword {
    fn from(req: UpdatePasswordRequest) -> Self {
        Self {
            email: req.email,
            captcha: req.captcha,
            password: req.password,
        }
    }
}

/// Profile change request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "email address is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "captcha must not be empty"))]
    pub captcha: String,
    #[serde(default, alias = "nickname")]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub head_pic: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            email: req.email,
            captcha: req.captcha,
            nick_name: req.nick_name,
            head_pic: req.head_pic,
        }
    }
}

/// `?id=` of the freeze endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FreezeQuery {
    pub id: i64,
}

/// Query of the user list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub page_no: Option<i64>,
    pub page_size: Option<i64>,
    pub username: Option<String>,
    #[serde(alias = "nickname")]
    pub nick_name: Option<String>,
    pub email: Option<String>,
}

/// Query of the booking list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub page_no: Option<i64>,
    pub page_size: Option<i64>,
    pub username: Option<String>,
    pub meeting_room_name: Option<String>,
    pub meeting_room_position: Option<String>,
    /// Epoch milliseconds.
    pub booking_time_range_start: Option<i64>,
    /// Epoch milliseconds.
    pub booking_time_range_end: Option<i64>,
}

/// Booking request body. Times are epoch milliseconds.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddBookingRequest {
    #[serde(alias = "roomId")]
    pub meeting_room_id: i64,
    #[serde(deserialize_with = "deserialize_millis")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_millis")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    #[validate(length(max = 100, message = "note must be at most 100 characters"))]
    pub note: Option<String>,
}

impl From<AddBookingRequest> for AddBooking {
    fn from(req: AddBookingRequest) -> Self {
        Self {
            room_id: req.meeting_room_id,
            start_time: req.start_time,
            end_time: req.end_time,
            note: req.note,
        }
    }
}

/// Query of the meeting room list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRoomListQuery {
    pub page_no: Option<i64>,
    pub page_size: Option<i64>,
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub equipment: Option<String>,
}

/// Meeting room creation body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMeetingRoomRequest {
    #[validate(length(min = 1, max = 50, message = "name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: i32,
    #[validate(length(min = 1, max = 50, message = "location must be 1 to 50 characters"))]
    pub location: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "equipment must be at most 50 characters"))]
    pub equipment: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "description must be at most 100 characters"))]
    pub description: String,
}

impl From<CreateMeetingRoomRequest> for CreateMeetingRoom {
    fn from(req: CreateMeetingRoomRequest) -> Self {
        Self {
            name: req.name,
            capacity: req.capacity,
            location: req.location,
            equipment: req.equipment,
            description: req.description,
        }
    }
}

/// Meeting room update body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMeetingRoomRequest {
    pub id: i64,
    #[validate(length(min = 1, max = 50, message = "name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: i32,
    #[validate(length(min = 1, max = 50, message = "location must be 1 to 50 characters"))]
    pub location: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub description: String,
}

impl From<UpdateMeetingRoomRequest> for UpdateMeetingRoom {
    fn from(req: UpdateMeetingRoomRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            capacity: req.capacity,
            location: req.location,
            equipment: req.equipment,
            description: req.description,
        }
    }
}

/// Window of the statistic endpoints. Each bound is epoch milliseconds,
/// RFC 3339 or `YYYY-MM-DD`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticQuery {
    pub start_time: String,
    pub end_time: String,
}
