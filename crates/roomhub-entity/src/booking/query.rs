//! Booking search filters.

use roomhub_core::types::{PageRequest, TimeRange};

/// Filters for the booking search. Text filters are substring matches; the
/// time range is applied to the booking start time.
#[derive(Debug, Clone, Default)]
pub struct BookingQuery {
    /// Booker username substring.
    pub username: Option<String>,
    /// Room name substring.
    pub room_name: Option<String>,
    /// Room location substring.
    pub room_location: Option<String>,
    /// Inclusive window on `start_time`.
    pub range: Option<TimeRange>,
    /// Page to return.
    pub page: PageRequest,
}
