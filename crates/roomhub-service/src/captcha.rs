//! One-time email captchas stored in the credential cache.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::info;

use roomhub_cache::keys;
use roomhub_core::config::auth::AuthConfig;
use roomhub_core::error::AppError;
use roomhub_core::traits::{CacheProvider, MailMessage, Mailer};

/// Which flow a captcha belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptchaKind {
    Register,
    UpdatePassword,
    UpdateUser,
}

impl CaptchaKind {
    fn key(self, address: &str) -> String {
        match self {
            Self::Register => keys::register_captcha(address),
            Self::UpdatePassword => keys::update_password_captcha(address),
            Self::UpdateUser => keys::update_user_captcha(address),
        }
    }

    fn subject(self) -> &'static str {
        match self {
            Self::Register => "Registration verification code",
            Self::UpdatePassword => "Password change verification code",
            Self::UpdateUser => "Profile update verification code",
        }
    }
}

/// Issues and checks captchas.
#[derive(Debug, Clone)]
pub struct CaptchaService {
    cache: Arc<dyn CacheProvider>,
    mailer: Arc<dyn Mailer>,
    register_ttl: Duration,
    update_ttl: Duration,
}

impl CaptchaService {
    pub fn new(cache: Arc<dyn CacheProvider>, mailer: Arc<dyn Mailer>, config: &AuthConfig) -> Self {
        Self {
            cache,
            mailer,
            register_ttl: Duration::from_secs(config.register_captcha_ttl_seconds),
            update_ttl: Duration::from_secs(config.update_captcha_ttl_seconds),
        }
    }

    fn ttl(&self, kind: CaptchaKind) -> Duration {
        match kind {
            CaptchaKind::Register => self.register_ttl,
            CaptchaKind::UpdatePassword | CaptchaKind::UpdateUser => self.update_ttl,
        }
    }

    /// Generate a 6-digit code, store it under the flow's key and mail it.
    pub async fn send(&self, kind: CaptchaKind, address: &str) -> Result<String, AppError> {
        if address.trim().is_empty() {
            return Err(AppError::validation("email address must not be empty"));
        }

        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        self.cache
            .set(&kind.key(address), &code, self.ttl(kind))
            .await?;

        self.mailer
            .send(&MailMessage::new(
                address,
                kind.subject(),
                format!("<p>Your verification code is: {code}</p>"),
            ))
            .await?;

        info!(?kind, address = %address, "Captcha sent");
        Ok("sent".to_string())
    }

    /// Check a submitted code against the stored one.
    pub async fn verify(&self, kind: CaptchaKind, address: &str, code: &str) -> Result<(), AppError> {
        let stored = self
            .cache
            .get(&kind.key(address))
            .await?
            .ok_or_else(|| AppError::validation("captcha expired"))?;

        if stored != code {
            return Err(AppError::validation("captcha incorrect"));
        }
        Ok(())
    }
}
