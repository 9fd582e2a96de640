//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account. Admin and regular accounts live in the same table
/// but are separate login partitions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name.
    pub nick_name: String,
    /// Email address; receives captchas and urge reminders.
    pub email: String,
    /// Avatar URL.
    pub head_pic: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Whether the account is frozen.
    pub is_frozen: bool,
    /// Whether the account belongs to the admin partition.
    pub is_admin: bool,
    /// When the user was created.
    #[serde(rename = "createTime")]
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    #[serde(rename = "updateTime")]
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name.
    pub nick_name: String,
    /// Email address.
    pub email: String,
    /// Admin partition flag.
    pub is_admin: bool,
}

/// Profile fields a user may change. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// The user to update.
    pub id: i64,
    /// New display name.
    pub nick_name: Option<String>,
    /// New avatar URL.
    pub head_pic: Option<String>,
}
