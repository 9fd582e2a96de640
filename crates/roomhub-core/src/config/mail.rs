//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Mail provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Provider: `"log"`, `"http"`, or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Sender address placed on every message.
    #[serde(default = "default_from")]
    pub from: String,
    /// Settings for the HTTP relay provider.
    #[serde(default)]
    pub http: HttpMailConfig,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            from: default_from(),
            http: HttpMailConfig::default(),
        }
    }
}

/// HTTP mail relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpMailConfig {
    /// Endpoint that accepts `POST` JSON messages.
    #[serde(default)]
    pub endpoint: String,
    /// Bearer token sent with each request.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for HttpMailConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_provider() -> String {
    "log".to_string()
}

fn default_from() -> String {
    "meeting-room-system@localhost".to_string()
}

fn default_timeout() -> u64 {
    10
}
