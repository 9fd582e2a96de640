//! # roomhub-service
//!
//! Business logic service layer for RoomHub. Each service orchestrates
//! stores, the credential cache, the mailer and authentication to implement
//! application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod booking;
pub mod captcha;
pub mod context;
pub mod meeting_room;
pub mod statistic;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use booking::BookingService;
pub use captcha::{CaptchaKind, CaptchaService};
pub use context::RequestContext;
pub use meeting_room::MeetingRoomService;
pub use statistic::StatisticService;
pub use user::UserService;

/// Message returned by operations that complete without a payload.
pub const SUCCESS: &str = "success";
