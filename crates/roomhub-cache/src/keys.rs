//! Credential store key builders.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. The Redis provider adds its
//! configured prefix on top of these names.

/// Registration captcha sent to `email`.
pub fn register_captcha(email: &str) -> String {
    format!("captcha_{email}")
}

/// Password-change captcha sent to `email`.
pub fn update_password_captcha(email: &str) -> String {
    format!("update_password_captcha_{email}")
}

/// Profile-update captcha sent to `email`.
pub fn update_user_captcha(email: &str) -> String {
    format!("update_user_captcha_{email}")
}

/// Throttle flag set after a booking has been urged.
pub fn booking_urge(booking_id: i64) -> String {
    format!("urge_{booking_id}")
}

/// Cached address of the admin who receives urge reminders.
pub fn admin_email() -> String {
    "admin_email".to_string()
}
