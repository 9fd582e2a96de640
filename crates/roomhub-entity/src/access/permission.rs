//! Permission entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named capability granted through roles, e.g. `"ccc"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: i64,
    /// Capability code checked by route policies.
    pub code: String,
    /// Human-readable description.
    pub description: String,
}
