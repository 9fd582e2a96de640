//! The guard decision shared by every protected route.

use std::sync::Arc;

use tracing::debug;

use roomhub_core::error::AppError;

use crate::jwt::decoder::{AccessTokenState, INVALID_TOKEN_MESSAGE};
use crate::jwt::{AccessClaims, JwtDecoder, TokenPair};
use crate::session::SessionManager;

use super::policy::RoutePolicy;

/// Message for requests that carry no access token.
pub const LOGIN_REQUIRED_MESSAGE: &str = "please log in first";

/// Result of a successful authorization.
#[derive(Debug, Clone, Default)]
pub struct GuardOutcome {
    /// The caller identity, absent on public routes.
    pub claims: Option<AccessClaims>,
    /// New tokens when an expired access token was transparently refreshed.
    pub refreshed: Option<TokenPair>,
}

/// Decides whether a request may proceed.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    decoder: Arc<JwtDecoder>,
    sessions: Arc<SessionManager>,
}

impl RouteGuard {
    pub fn new(decoder: Arc<JwtDecoder>, sessions: Arc<SessionManager>) -> Self {
        Self { decoder, sessions }
    }

    /// Evaluate `policy` against the tokens presented with a request.
    pub async fn authorize(
        &self,
        policy: &RoutePolicy,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> Result<GuardOutcome, AppError> {
        if !policy.requires_login {
            return Ok(GuardOutcome::default());
        }

        let token = access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication(LOGIN_REQUIRED_MESSAGE))?;

        let (claims, refreshed) = match self.decoder.inspect_access_token(token) {
            AccessTokenState::Valid(claims) => (claims, None),
            AccessTokenState::Expired(expired) => {
                let refresh_token = refresh_token
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| AppError::authentication(INVALID_TOKEN_MESSAGE))?;
                debug!(user_id = expired.user_id, "Access token expired, refreshing");
                let issued = self.sessions.refresh(refresh_token, expired.is_admin).await?;
                (issued.claims, Some(issued.tokens))
            }
            AccessTokenState::Invalid => {
                return Err(AppError::authentication(INVALID_TOKEN_MESSAGE));
            }
        };

        if !claims.has_permissions(&policy.required_permissions) {
            debug!(
                user_id = claims.user_id,
                required = ?policy.required_permissions,
                "Missing permissions"
            );
            return Err(AppError::authorization("insufficient permissions"));
        }

        Ok(GuardOutcome {
            claims: Some(claims),
            refreshed,
        })
    }
}
