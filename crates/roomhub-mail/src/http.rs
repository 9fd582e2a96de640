//! Mailer that posts messages to an HTTP relay.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use roomhub_core::config::mail::HttpMailConfig;
use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::traits::mailer::{MailMessage, Mailer};

/// JSON body accepted by the relay.
#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Delivers mail through a JSON relay endpoint.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
}

impl HttpMailer {
    /// Build the HTTP client for the relay.
    pub fn new(config: &HttpMailConfig, from: impl Into<String>) -> AppResult<Self> {
        if config.endpoint.is_empty() {
            return Err(AppError::configuration(
                "mail.http.endpoint is required for the http mail provider",
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            from: from.into(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        let body = RelayRequest {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
        };
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Mail relay request failed", e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(to = %message.to, subject = %message.subject, "Mail delivered");
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            warn!(%status, body = %text, "Mail relay rejected message");
            Err(AppError::external_service(format!(
                "Mail relay responded with {status}"
            )))
        }
    }
}
