//! Request context carrying the authenticated user and resolved permissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roomhub_auth::AccessClaims;

/// Context for the current authenticated request.
///
/// Built from the verified access token and passed into service methods so
/// that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: i64,
    /// The username (convenience field from JWT claims).
    pub username: String,
    /// Login partition of the token.
    pub is_admin: bool,
    /// Role names at token issuance.
    pub roles: Vec<String>,
    /// Permission codes at token issuance.
    pub permissions: Vec<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl From<&AccessClaims> for RequestContext {
    fn from(claims: &AccessClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username.clone(),
            is_admin: claims.is_admin,
            roles: claims.roles.clone(),
            permissions: claims.permissions.clone(),
            request_time: Utc::now(),
        }
    }
}
