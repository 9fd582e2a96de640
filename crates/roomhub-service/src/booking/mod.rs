//! Booking lifecycle: search, conflict-checked creation, status changes and
//! urge reminders.

pub mod service;
pub mod urge;

pub use service::{AddBooking, BookingFilter, BookingService};
