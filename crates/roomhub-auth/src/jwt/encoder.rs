//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use roomhub_core::config::auth::AuthConfig;
use roomhub_core::error::AppError;
use roomhub_entity::user::UserInfo;

use super::claims::{AccessClaims, RefreshClaims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    #[serde(skip)]
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    #[serde(skip)]
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_ttls(
            &config.jwt_secret,
            Duration::minutes(config.jwt_access_ttl_minutes as i64),
            Duration::hours(config.jwt_refresh_ttl_hours as i64),
        )
    }

    /// Creates an encoder with explicit lifetimes.
    pub fn with_ttls(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Build access claims for a resolved identity, stamped with the
    /// current time.
    pub fn access_claims(&self, info: &UserInfo) -> AccessClaims {
        let now = Utc::now();
        AccessClaims {
            user_id: info.id,
            username: info.username.clone(),
            roles: info.roles.clone(),
            permissions: info.permission_codes(),
            is_admin: info.is_admin,
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
            token_type: TokenType::Access,
        }
    }

    /// Sign `access` and a matching refresh token for the same user.
    pub fn generate_token_pair(&self, access: &AccessClaims) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_expires_at = DateTime::from_timestamp(access.exp, 0).unwrap_or(now);
        let refresh_expires_at = now + self.refresh_ttl;

        let refresh = RefreshClaims {
            user_id: access.user_id,
            iat: now.timestamp(),
            exp: refresh_expires_at.timestamp(),
            token_type: TokenType::Refresh,
        };

        let access_token = encode(&Header::default(), access, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        let refresh_token = encode(&Header::default(), &refresh, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }
}
