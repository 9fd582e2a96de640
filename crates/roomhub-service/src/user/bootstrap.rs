//! Creates the initial admin account at startup.

use tracing::info;

use roomhub_cache::keys;
use roomhub_core::config::auth::AdminBootstrapConfig;
use roomhub_core::error::AppError;
use roomhub_entity::user::{CreateUser, User};

use super::service::UserService;

/// Name of the role granted to the bootstrapped admin.
pub const ADMIN_ROLE: &str = "admin";

impl UserService {
    /// Create the configured admin account unless an admin already exists.
    ///
    /// Returns the created account, or `None` when nothing was done.
    pub async fn bootstrap_admin(
        &self,
        config: &AdminBootstrapConfig,
    ) -> Result<Option<User>, AppError> {
        if let Some(existing) = self.users.find_first_admin().await? {
            info!(username = %existing.username, "Admin account present, skipping bootstrap");
            return Ok(None);
        }

        if config.username.trim().is_empty() || config.password.is_empty() {
            return Err(AppError::configuration(
                "admin bootstrap requires a username and a password",
            ));
        }

        let password_hash = self.hasher.hash_password(&config.password)?;
        let admin = self
            .users
            .create(&CreateUser {
                username: config.username.clone(),
                password_hash,
                nick_name: config.nickname.clone(),
                email: config.email.clone(),
                is_admin: true,
            })
            .await?;

        let role = self
            .roles
            .ensure_role(ADMIN_ROLE, &config.permissions)
            .await?;
        self.roles.assign_role(admin.id, role.id).await?;

        // A stale address may survive from a previous admin.
        self.cache.delete(&keys::admin_email()).await?;

        info!(
            user_id = admin.id,
            username = %admin.username,
            permissions = ?config.permissions,
            "Admin account bootstrapped"
        );
        Ok(Some(admin))
    }
}
