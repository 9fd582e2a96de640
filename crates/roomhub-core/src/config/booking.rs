//! Booking rule configuration.

use serde::{Deserialize, Serialize};

/// How a new booking is compared against existing active bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictMode {
    /// Any intersection of the two intervals is a conflict.
    #[default]
    Overlap,
    /// Only an existing booking that fully contains the new interval
    /// is a conflict.
    Contained,
}

/// Booking rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Conflict predicate used when creating bookings.
    #[serde(default)]
    pub conflict_mode: ConflictMode,
    /// Minimum spacing between two urges for the same booking.
    #[serde(default = "default_urge_interval")]
    pub urge_interval_minutes: u64,
    /// Search window applied when only a range start is given.
    #[serde(default = "default_search_window")]
    pub default_search_window_minutes: i64,
    /// Upper bound for `pageSize` on list endpoints.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            conflict_mode: ConflictMode::default(),
            urge_interval_minutes: default_urge_interval(),
            default_search_window_minutes: default_search_window(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_urge_interval() -> u64 {
    30
}

fn default_search_window() -> i64 {
    60
}

fn default_max_page_size() -> u64 {
    100
}
