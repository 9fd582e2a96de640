//! Mailer that only logs.

use async_trait::async_trait;
use tracing::info;

use roomhub_core::result::AppResult;
use roomhub_core::traits::mailer::{MailMessage, Mailer};

/// Writes every message to the log instead of delivering it.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    /// Create a log mailer with the configured sender address.
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            body = %message.html,
            "Mail delivery (log provider)"
        );
        Ok(())
    }
}
