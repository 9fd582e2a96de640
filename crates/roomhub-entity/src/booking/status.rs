//! Booking lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a booking. Transitions are administrative overwrites; any
/// status may be replaced by any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting approval.
    Pending,
    /// Approved by an admin.
    Approved,
    /// Rejected by an admin.
    Rejected,
    /// Released after use or cancellation.
    Unbound,
}

impl BookingStatus {
    /// Whether the booking still occupies its slot for conflict checks.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unbound => "unbound",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
