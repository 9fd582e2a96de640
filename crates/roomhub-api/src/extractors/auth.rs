//! `AuthUser` extractor: the caller identity placed by the guard middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use roomhub_auth::guard::route_guard::LOGIN_REQUIRED_MESSAGE;
use roomhub_core::error::AppError;
use roomhub_service::RequestContext;

use crate::error::ApiError;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::authentication(LOGIN_REQUIRED_MESSAGE).into())
    }
}
