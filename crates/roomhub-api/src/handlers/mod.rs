//! HTTP request handlers, one module per domain.

pub mod booking;
pub mod health;
pub mod meeting_room;
pub mod statistic;
pub mod user;
