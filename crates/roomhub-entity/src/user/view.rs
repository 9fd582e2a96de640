//! Read projections of a user that never carry the password hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::User;
use crate::access::Permission;

/// Public profile of a user, used by the info endpoint, the user list and
/// embedded in booking search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: i64,
    pub username: String,
    pub nick_name: String,
    pub email: String,
    pub head_pic: Option<String>,
    pub phone_number: Option<String>,
    pub is_frozen: bool,
    pub create_time: DateTime<Utc>,
}

impl From<&User> for UserDetail {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            nick_name: user.nick_name.clone(),
            email: user.email.clone(),
            head_pic: user.head_pic.clone(),
            phone_number: user.phone_number.clone(),
            is_frozen: user.is_frozen,
            create_time: user.created_at,
        }
    }
}

/// Identity returned by a successful login: profile, role names and the
/// aggregated permission list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub nick_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub head_pic: Option<String>,
    /// Creation time as milliseconds since the epoch.
    pub create_time: i64,
    pub is_frozen: bool,
    pub is_admin: bool,
    pub roles: Vec<String>,
    pub permissions: Vec<Permission>,
}

impl UserInfo {
    /// Build the login projection from a user and its resolved grants.
    pub fn new(user: &User, roles: Vec<String>, permissions: Vec<Permission>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            nick_name: user.nick_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            head_pic: user.head_pic.clone(),
            create_time: user.created_at.timestamp_millis(),
            is_frozen: user.is_frozen,
            is_admin: user.is_admin,
            roles,
            permissions,
        }
    }

    /// Permission codes in list order.
    pub fn permission_codes(&self) -> Vec<String> {
        self.permissions.iter().map(|p| p.code.clone()).collect()
    }
}
