//! End-to-end tests that drive the HTTP API over in-memory adapters.

mod helpers;

mod auth_test;
mod booking_test;
mod health_test;
mod meeting_room_test;
mod statistic_test;
