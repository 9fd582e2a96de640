//! Route guard middleware.
//!
//! Each protected route group carries a [`RoutePolicy`]. The middleware
//! reads the bearer access token and the optional refresh token header,
//! asks the [`RouteGuard`] for a decision, stores the caller's
//! [`RequestContext`] in the request extensions and, when the access token
//! was transparently refreshed, returns the new pair in response headers.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use roomhub_auth::{RoutePolicy, TokenPair};
use roomhub_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Response header carrying a refreshed access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";
/// Request header with the refresh token, and response header with the
/// rotated one.
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

/// State handed to one guarded route group.
#[derive(Clone)]
pub struct GuardLayerState {
    app: AppState,
    policy: Arc<RoutePolicy>,
}

impl GuardLayerState {
    pub fn new(app: AppState, policy: RoutePolicy) -> Self {
        Self {
            app,
            policy: Arc::new(policy),
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn attach_tokens(headers: &mut HeaderMap, tokens: &TokenPair) {
    match (
        HeaderValue::from_str(&tokens.access_token),
        HeaderValue::from_str(&tokens.refresh_token),
    ) {
        (Ok(access), Ok(refresh)) => {
            headers.insert(ACCESS_TOKEN_HEADER, access);
            headers.insert(REFRESH_TOKEN_HEADER, refresh);
        }
        _ => warn!("Refreshed tokens are not valid header values"),
    }
}

/// Enforce the route group's policy.
pub async fn authorize(
    State(guard): State<GuardLayerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let access = bearer_token(request.headers());
    let refresh = header_string(request.headers(), REFRESH_TOKEN_HEADER);

    let outcome = guard
        .app
        .guard
        .authorize(&guard.policy, access.as_deref(), refresh.as_deref())
        .await?;

    if let Some(claims) = &outcome.claims {
        request
            .extensions_mut()
            .insert(RequestContext::from(claims));
    }

    let mut response = next.run(request).await;

    if let Some(tokens) = &outcome.refreshed {
        attach_tokens(response.headers_mut(), tokens);
    }

    Ok(response)
}
