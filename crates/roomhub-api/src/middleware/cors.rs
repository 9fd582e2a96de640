//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use roomhub_core::config::app::CorsConfig;

use super::auth::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};

/// Builds a CORS tower layer from configuration.
///
/// Refreshed tokens travel in response headers, so those are exposed.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static(ACCESS_TOKEN_HEADER),
            HeaderName::from_static(REFRESH_TOKEN_HEADER),
        ])
        .max_age(Duration::from_secs(config.max_age_seconds));

    if config.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    layer
}
