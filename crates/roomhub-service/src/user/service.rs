//! User operations: registration, login, profile and account management.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info, warn};

use roomhub_auth::password::{PasswordHasher, PasswordValidator};
use roomhub_auth::session::{LoginResult, SessionManager};
use roomhub_auth::TokenPair;
use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::traits::CacheProvider;
use roomhub_core::types::PageResponse;
use roomhub_database::store::{RoleStore, UserStore};
use roomhub_entity::user::{CreateUser, UpdateProfile, UserDetail, UserQuery};

use crate::SUCCESS;
use crate::captcha::{CaptchaKind, CaptchaService};
use crate::context::RequestContext;

/// Registration form.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    pub nick_name: String,
    pub email: String,
    pub captcha: String,
}

/// Password change form. The captcha was sent to `email`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePassword {
    pub email: String,
    pub captcha: String,
    pub password: String,
}

/// Profile change form. Empty fields keep their stored value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub email: String,
    pub captcha: String,
    pub nick_name: Option<String>,
    pub head_pic: Option<String>,
}

/// Handles account operations.
#[derive(Clone)]
pub struct UserService {
    /// Account storage.
    pub(super) users: Arc<dyn UserStore>,
    /// Role storage, used by the admin bootstrap.
    pub(super) roles: Arc<dyn RoleStore>,
    /// Credential cache.
    pub(super) cache: Arc<dyn CacheProvider>,
    captchas: Arc<CaptchaService>,
    sessions: Arc<SessionManager>,
    pub(super) hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

/// Keep a profile field only when it carries a value.
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

impl UserService {
    /// Creates a new user service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        cache: Arc<dyn CacheProvider>,
        captchas: Arc<CaptchaService>,
        sessions: Arc<SessionManager>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            roles,
            cache,
            captchas,
            sessions,
            hasher,
            validator,
        }
    }

    /// Register a regular account.
    ///
    /// A storage failure on insert is logged and reported as a soft
    /// failure message rather than an error.
    pub async fn register(&self, form: &RegisterUser) -> Result<String, AppError> {
        self.captchas
            .verify(CaptchaKind::Register, &form.email, &form.captcha)
            .await?;

        if self.users.find_by_username(&form.username).await?.is_some() {
            return Err(AppError::conflict("username already exists"));
        }

        self.validator.validate(&form.password)?;
        let password_hash = self.hasher.hash_password(&form.password)?;

        let created = self
            .users
            .create(&CreateUser {
                username: form.username.clone(),
                password_hash,
                nick_name: form.nick_name.clone(),
                email: form.email.clone(),
                is_admin: false,
            })
            .await;

        match created {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "User registered");
                Ok("registered".to_string())
            }
            Err(e) if e.kind == ErrorKind::Conflict => Err(e),
            Err(e) => {
                error!(username = %form.username, error = %e, "Failed to store new user");
                Ok("registration failed".to_string())
            }
        }
    }

    /// Authenticate against one login partition.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<LoginResult, AppError> {
        self.sessions.login(username, password, is_admin).await
    }

    /// Exchange a refresh token for a new pair.
    pub async fn refresh(&self, refresh_token: &str, is_admin: bool) -> Result<TokenPair, AppError> {
        Ok(self.sessions.refresh(refresh_token, is_admin).await?.tokens)
    }

    /// Profile of the calling user.
    pub async fn info(&self, ctx: &RequestContext) -> Result<UserDetail, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .map(|user| UserDetail::from(&user))
            .ok_or_else(|| AppError::not_found("user does not exist"))
    }

    /// Change the calling user's password after a captcha check.
    pub async fn update_password(
        &self,
        ctx: &RequestContext,
        form: &UpdatePassword,
    ) -> Result<String, AppError> {
        self.captchas
            .verify(CaptchaKind::UpdatePassword, &form.email, &form.captcha)
            .await?;

        self.validator.validate(&form.password)?;
        let password_hash = self.hasher.hash_password(&form.password)?;

        match self.users.update_password(ctx.user_id, &password_hash).await {
            Ok(true) => {
                info!(user_id = ctx.user_id, "Password changed");
                Ok("password updated".to_string())
            }
            Ok(false) => Err(AppError::validation("user does not exist")),
            Err(e) => {
                error!(user_id = ctx.user_id, error = %e, "Failed to store password");
                Ok("password update failed".to_string())
            }
        }
    }

    /// Change the calling user's nickname and avatar after a captcha check.
    pub async fn update(&self, ctx: &RequestContext, form: &UpdateUser) -> Result<String, AppError> {
        self.captchas
            .verify(CaptchaKind::UpdateUser, &form.email, &form.captcha)
            .await?;

        let profile = UpdateProfile {
            id: ctx.user_id,
            nick_name: non_empty(&form.nick_name),
            head_pic: non_empty(&form.head_pic),
        };

        match self.users.update_profile(&profile).await {
            Ok(true) => {
                info!(user_id = ctx.user_id, "Profile updated");
                Ok("updated".to_string())
            }
            Ok(false) => Err(AppError::validation("user does not exist")),
            Err(e) => {
                error!(user_id = ctx.user_id, error = %e, "Failed to store profile");
                Ok("update failed".to_string())
            }
        }
    }

    /// Freeze an account so it can no longer log in.
    pub async fn freeze(&self, user_id: i64) -> Result<String, AppError> {
        if !self.users.set_frozen(user_id, true).await? {
            warn!(user_id, "Freeze requested for unknown user");
            return Err(AppError::validation("user does not exist"));
        }
        info!(user_id, "User frozen");
        Ok(SUCCESS.to_string())
    }

    /// Paginated user list without password hashes.
    pub async fn list(&self, query: &UserQuery) -> Result<PageResponse<UserDetail>, AppError> {
        Ok(self
            .users
            .search(query)
            .await?
            .map(|user| UserDetail::from(&user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use roomhub_core::types::PageRequest;

    use crate::test_support::Harness;

    fn register_form(username: &str, captcha: &str) -> RegisterUser {
        RegisterUser {
            username: username.to_string(),
            password: "secret1".to_string(),
            nick_name: "Nick".to_string(),
            email: "reg@example.com".to_string(),
            captcha: captcha.to_string(),
        }
    }

    async fn seed_captcha(h: &Harness, key: &str, code: &str) {
        h.cache
            .set(key, code, Duration::from_secs(300))
            .await
            .expect("seed captcha");
    }

    #[tokio::test]
    async fn test_register_once_then_conflict() {
        let h = Harness::new().await;
        seed_captcha(&h, "captcha_reg@example.com", "111111").await;

        let message = h
            .users
            .register(&register_form("newbie", "111111"))
            .await
            .expect("register");
        assert_eq!(message, "registered");

        let stored = h
            .store
            .find_by_username("newbie")
            .await
            .expect("find")
            .expect("stored");
        assert!(!stored.is_admin);
        assert_ne!(stored.password_hash, "secret1");

        let err = h
            .users
            .register(&register_form("newbie", "111111"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "username already exists");
    }

    #[tokio::test]
    async fn test_register_captcha_checks() {
        let h = Harness::new().await;

        let err = h
            .users
            .register(&register_form("x", "111111"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "captcha expired");

        seed_captcha(&h, "captcha_reg@example.com", "111111").await;
        let err = h
            .users
            .register(&register_form("x", "222222"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "captcha incorrect");
    }

    #[tokio::test]
    async fn test_registered_user_can_login() {
        let h = Harness::new().await;
        seed_captcha(&h, "captcha_reg@example.com", "111111").await;
        h.users
            .register(&register_form("walker", "111111"))
            .await
            .expect("register");

        let result = h.users.login("walker", "secret1", false).await.expect("login");
        assert_eq!(result.user_info.username, "walker");
        assert!(h.users.login("walker", "secret1", true).await.is_err());
    }

    #[tokio::test]
    async fn test_update_password() {
        let h = Harness::new().await;
        let user = h.create_user("pwuser", false).await;
        let ctx = h.context(&user);
        seed_captcha(&h, "update_password_captcha_pw@example.com", "333333").await;

        let form = UpdatePassword {
            email: "pw@example.com".into(),
            captcha: "333333".into(),
            password: "changed1".into(),
        };
        let message = h.users.update_password(&ctx, &form).await.expect("update");
        assert_eq!(message, "password updated");
        h.users.login("pwuser", "changed1", false).await.expect("new password works");
    }

    #[tokio::test]
    async fn test_update_profile_skips_empty_fields() {
        let h = Harness::new().await;
        let user = h.create_user("profiled", false).await;
        let ctx = h.context(&user);
        seed_captcha(&h, "update_user_captcha_p@example.com", "444444").await;

        let form = UpdateUser {
            email: "p@example.com".into(),
            captcha: "444444".into(),
            nick_name: Some(String::new()),
            head_pic: Some("/avatars/p.png".into()),
        };
        assert_eq!(h.users.update(&ctx, &form).await.expect("update"), "updated");

        let detail = h.users.info(&ctx).await.expect("info");
        assert_eq!(detail.nick_name, "profiled");
        assert_eq!(detail.head_pic.as_deref(), Some("/avatars/p.png"));
    }

    #[tokio::test]
    async fn test_freeze() {
        let h = Harness::new().await;
        let user = h.create_user("icy", false).await;

        assert_eq!(h.users.freeze(user.id).await.expect("freeze"), SUCCESS);
        let err = h.users.login("icy", "secret", false).await.unwrap_err();
        assert_eq!(err.message, "account is frozen");

        let err = h.users.freeze(9999).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let h = Harness::new().await;
        for i in 0..12 {
            h.create_user(&format!("member{i:02}"), false).await;
        }
        h.create_user("outsider", false).await;

        let page = h
            .users
            .list(&UserQuery {
                username: Some("member".into()),
                page: PageRequest { page: 2, page_size: 5 },
                ..Default::default()
            })
            .await
            .expect("list");
        assert_eq!(page.total_count, 12);
        assert_eq!(page.items.len(), 5);
        assert!(page.items.iter().all(|u| u.username.starts_with("member")));
    }
}
