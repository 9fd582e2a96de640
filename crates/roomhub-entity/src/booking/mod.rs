//! Booking entities.

pub mod detail;
pub mod model;
pub mod query;
pub mod status;

pub use detail::BookingDetail;
pub use model::{Booking, NewBooking};
pub use query::BookingQuery;
pub use status::BookingStatus;
