//! Mail manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use roomhub_core::config::mail::MailConfig;
use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_core::traits::mailer::{MailMessage, Mailer};

use crate::http::HttpMailer;
use crate::log::LogMailer;
use crate::memory::MemoryMailer;

/// Mail manager that wraps the configured mail provider.
#[derive(Debug, Clone)]
pub struct MailManager {
    inner: Arc<dyn Mailer>,
}

impl MailManager {
    /// Create a mail manager from configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let inner: Arc<dyn Mailer> = match config.provider.as_str() {
            "log" => {
                info!("Initializing log mail provider");
                Arc::new(LogMailer::new(&config.from))
            }
            "http" => {
                info!(endpoint = %config.http.endpoint, "Initializing HTTP relay mail provider");
                Arc::new(HttpMailer::new(&config.http, &config.from)?)
            }
            "memory" => {
                info!("Initializing in-memory mail provider");
                Arc::new(MemoryMailer::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown mail provider: '{other}'. Supported: log, http, memory"
                )));
            }
        };
        Ok(Self { inner })
    }

    /// Create a mail manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn Mailer>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl Mailer for MailManager {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        self.inner.send(message).await
    }
}
