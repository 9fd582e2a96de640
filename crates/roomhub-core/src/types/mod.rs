//! Core type definitions used across the RoomHub workspace.

pub mod pagination;
pub mod time_range;

pub use pagination::{PageRequest, PageResponse};
pub use time_range::TimeRange;
