//! JWT token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::de::DeserializeOwned;
use tracing::debug;

use roomhub_core::config::auth::AuthConfig;
use roomhub_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims, TokenType};

/// Message returned for every token verification failure.
pub const INVALID_TOKEN_MESSAGE: &str = "token invalid, please log in again";

/// Outcome of inspecting an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessTokenState {
    /// Signature and expiry are valid.
    Valid(AccessClaims),
    /// Signature is valid but the token has expired.
    Expired(AccessClaims),
    /// Malformed, wrongly signed, or not an access token.
    Invalid,
}

/// Validates JWT tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation including expiry.
    validation: Validation,
    /// Validation that skips expiry, used to read expired access tokens.
    signature_only: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_secret(&config.jwt_secret)
    }

    /// Creates a decoder for the given HMAC secret.
    pub fn from_secret(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        let mut signature_only = validation.clone();
        signature_only.validate_exp = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            signature_only,
        }
    }

    /// Classify an access token without failing.
    pub fn inspect_access_token(&self, token: &str) -> AccessTokenState {
        match decode::<AccessClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) if data.claims.token_type == TokenType::Access => {
                AccessTokenState::Valid(data.claims)
            }
            Ok(_) => AccessTokenState::Invalid,
            Err(e) if matches!(e.kind(), JwtErrorKind::ExpiredSignature) => {
                match decode::<AccessClaims>(token, &self.decoding_key, &self.signature_only) {
                    Ok(data) if data.claims.token_type == TokenType::Access => {
                        AccessTokenState::Expired(data.claims)
                    }
                    _ => AccessTokenState::Invalid,
                }
            }
            Err(e) => {
                debug!(error = %e, "Rejected access token");
                AccessTokenState::Invalid
            }
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        let claims: AccessClaims = self.decode_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::authentication(INVALID_TOKEN_MESSAGE));
        }
        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        let claims: RefreshClaims = self.decode_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::authentication(INVALID_TOKEN_MESSAGE));
        }
        Ok(claims)
    }

    /// Internal decode without type checking. Every failure maps to the
    /// same authentication error.
    fn decode_token<T: DeserializeOwned>(&self, token: &str) -> Result<T, AppError> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token validation failed");
                AppError::authentication(INVALID_TOKEN_MESSAGE)
            })
    }
}
