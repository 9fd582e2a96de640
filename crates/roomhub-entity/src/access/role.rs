//! Role entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::permission::Permission;

/// A named group of permissions assigned to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: i64,
    /// Unique role name.
    pub name: String,
}

/// A role together with its permissions in assignment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleWithPermissions {
    pub role: Role,
    pub permissions: Vec<Permission>,
}
