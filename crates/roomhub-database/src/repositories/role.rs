//! Role and permission repository implementation.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_entity::access::{Permission, Role, RoleWithPermissions};

use crate::store::RoleStore;

/// One role/permission pair of a user, in assignment order.
#[derive(Debug, FromRow)]
struct GrantRow {
    role_id: i64,
    role_name: String,
    permission_id: Option<i64>,
    permission_code: Option<String>,
    permission_description: Option<String>,
}

/// Repository for roles, permissions and their assignments.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Fold consecutive rows of the same role into one entry.
fn group_grants(rows: Vec<GrantRow>) -> Vec<RoleWithPermissions> {
    let mut grouped: Vec<RoleWithPermissions> = Vec::new();
    for row in rows {
        let permission = match (row.permission_id, row.permission_code) {
            (Some(id), Some(code)) => Some(Permission {
                id,
                code,
                description: row.permission_description.unwrap_or_default(),
            }),
            _ => None,
        };
        match grouped.last_mut() {
            Some(last) if last.role.id == row.role_id => {
                last.permissions.extend(permission);
            }
            _ => grouped.push(RoleWithPermissions {
                role: Role {
                    id: row.role_id,
                    name: row.role_name,
                },
                permissions: permission.into_iter().collect(),
            }),
        }
    }
    grouped
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn roles_with_permissions(&self, user_id: i64) -> AppResult<Vec<RoleWithPermissions>> {
        let rows = sqlx::query_as::<_, GrantRow>(
            "SELECT r.id AS role_id, r.name AS role_name, \
                    p.id AS permission_id, p.code AS permission_code, \
                    p.description AS permission_description \
             FROM user_roles ur \
             JOIN roles r ON r.id = ur.role_id \
             LEFT JOIN role_permissions rp ON rp.role_id = r.id \
             LEFT JOIN permissions p ON p.id = rp.permission_id \
             WHERE ur.user_id = $1 \
             ORDER BY ur.position, rp.position",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user roles", e))?;

        Ok(group_grants(rows))
    }

    async fn ensure_role(&self, name: &str, permission_codes: &[String]) -> AppResult<Role> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let role = sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING *",
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert role", e))?;

        for code in permission_codes {
            let permission_id: i64 = sqlx::query_scalar(
                "INSERT INTO permissions (code, description) VALUES ($1, $1) \
                 ON CONFLICT (code) DO UPDATE SET code = EXCLUDED.code \
                 RETURNING id",
            )
            .bind(code)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to upsert permission", e)
            })?;

            sqlx::query(
                "INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(role.id)
            .bind(permission_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to grant permission", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit role", e)
        })?;
        Ok(role)
    }

    async fn assign_role(&self, user_id: i64, role_id: i64) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to assign role", e))?;
        Ok(())
    }
}
