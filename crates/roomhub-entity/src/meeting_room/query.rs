//! Meeting room search filters.

use roomhub_core::types::PageRequest;

/// Filters for the room list.
#[derive(Debug, Clone, Default)]
pub struct MeetingRoomQuery {
    /// Name substring.
    pub name: Option<String>,
    /// Exact capacity.
    pub capacity: Option<i32>,
    /// Equipment substring.
    pub equipment: Option<String>,
    /// Page to return.
    pub page: PageRequest,
}
