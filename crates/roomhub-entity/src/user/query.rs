//! User search filters.

use roomhub_core::types::PageRequest;

/// Filters for the user list. Text filters are substring matches.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Username substring.
    pub username: Option<String>,
    /// Display name substring.
    pub nick_name: Option<String>,
    /// Email substring.
    pub email: Option<String>,
    /// Page to return.
    pub page: PageRequest,
}
