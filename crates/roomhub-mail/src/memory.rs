//! Mailer that records messages in memory.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use roomhub_core::result::AppResult;
use roomhub_core::traits::mailer::{MailMessage, Mailer};

/// Keeps every sent message; clones share the same outbox.
#[derive(Debug, Clone, Default)]
pub struct MemoryMailer {
    outbox: Arc<Mutex<Vec<MailMessage>>>,
}

impl MemoryMailer {
    /// Create an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all messages sent so far.
    pub async fn sent(&self) -> Vec<MailMessage> {
        self.outbox.lock().await.clone()
    }

    /// Most recent message sent to `to`.
    pub async fn last_to(&self, to: &str) -> Option<MailMessage> {
        self.outbox
            .lock()
            .await
            .iter()
            .rev()
            .find(|m| m.to == to)
            .cloned()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        self.outbox.lock().await.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_outbox() {
        let mailer = MemoryMailer::new();
        let handle = mailer.clone();
        mailer
            .send(&MailMessage::new("a@b.c", "Captcha", "<p>1</p>"))
            .await
            .expect("send");
        mailer
            .send(&MailMessage::new("a@b.c", "Captcha", "<p>2</p>"))
            .await
            .expect("send");
        assert_eq!(handle.sent().await.len(), 2);
        assert_eq!(
            handle.last_to("a@b.c").await.map(|m| m.html),
            Some("<p>2</p>".to_string())
        );
        assert!(handle.last_to("x@y.z").await.is_none());
    }
}
