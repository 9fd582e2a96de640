//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Plain message response, e.g. `{"message": "success"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when every backend answered, `degraded` otherwise.
    pub status: String,
    pub version: String,
    pub database: String,
    pub cache: String,
}
