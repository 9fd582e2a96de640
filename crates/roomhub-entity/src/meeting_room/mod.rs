//! Meeting room entities.

pub mod model;
pub mod query;

pub use model::{CreateMeetingRoom, MeetingRoom, UpdateMeetingRoom};
pub use query::MeetingRoomQuery;
