//! JWT claims carried by access and refresh tokens.

use serde::{Deserialize, Serialize};

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived token presented on every request.
    Access,
    /// Long-lived token exchanged for a new pair.
    Refresh,
}

/// Identity snapshot embedded in an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub user_id: i64,
    pub username: String,
    /// Role names at issuance time.
    pub roles: Vec<String>,
    /// Permission codes at issuance time.
    pub permissions: Vec<String>,
    /// Login partition the token was issued for.
    pub is_admin: bool,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    pub token_type: TokenType,
}

impl AccessClaims {
    /// Whether every code in `required` is among the granted permissions.
    pub fn has_permissions(&self, required: &[String]) -> bool {
        required.iter().all(|code| self.permissions.contains(code))
    }
}

/// Minimal claims of a refresh token; everything else is re-read from
/// storage on refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshClaims {
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
    pub token_type: TokenType,
}
