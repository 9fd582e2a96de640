//! # roomhub-entity
//!
//! Domain entity models for RoomHub. Every struct in this crate represents
//! a database table row, a read projection, or a typed search filter.
//! Row types additionally derive `sqlx::FromRow`.

pub mod access;
pub mod booking;
pub mod meeting_room;
pub mod statistic;
pub mod user;
