//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token, password, and captcha settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Lifetime of a registration captcha in seconds.
    #[serde(default = "default_register_captcha_ttl")]
    pub register_captcha_ttl_seconds: u64,
    /// Lifetime of profile and password-change captchas in seconds.
    #[serde(default = "default_update_captcha_ttl")]
    pub update_captcha_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            jwt_refresh_ttl_hours: default_refresh_ttl(),
            password_min_length: default_password_min(),
            register_captcha_ttl_seconds: default_register_captcha_ttl(),
            update_captcha_ttl_seconds: default_update_captcha_ttl(),
        }
    }
}

/// Admin account created on startup when no admin exists yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBootstrapConfig {
    /// Login name.
    pub username: String,
    /// Initial plain-text password.
    pub password: String,
    /// Address that receives urge reminders.
    pub email: String,
    /// Display name.
    #[serde(default = "default_admin_nickname")]
    pub nickname: String,
    /// Permission codes granted through the `admin` role.
    #[serde(default)]
    pub permissions: Vec<String>,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    30
}

fn default_refresh_ttl() -> u64 {
    24 * 7
}

fn default_password_min() -> usize {
    6
}

fn default_register_captcha_ttl() -> u64 {
    5 * 60
}

fn default_update_captcha_ttl() -> u64 {
    10 * 60
}

fn default_admin_nickname() -> String {
    "Administrator".to_string()
}
