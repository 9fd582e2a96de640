//! Session lifecycle manager: login, token issuance and refresh.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use roomhub_core::error::AppError;
use roomhub_database::store::{RoleStore, UserStore};
use roomhub_entity::user::{User, UserInfo};

use crate::jwt::decoder::INVALID_TOKEN_MESSAGE;
use crate::jwt::{AccessClaims, JwtDecoder, JwtEncoder, TokenPair};
use crate::password::PasswordHasher;
use crate::permission;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    /// The authenticated identity with roles and permissions.
    pub user_info: UserInfo,
    pub access_token: String,
    pub refresh_token: String,
}

/// Freshly signed tokens together with the access claims they carry.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub claims: AccessClaims,
    pub tokens: TokenPair,
}

/// Authenticates accounts and issues token pairs.
#[derive(Clone)]
pub struct SessionManager {
    /// Account storage.
    users: Arc<dyn UserStore>,
    /// Role and permission storage.
    roles: Arc<dyn RoleStore>,
    password_hasher: Arc<PasswordHasher>,
    jwt_encoder: Arc<JwtEncoder>,
    jwt_decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("jwt_encoder", &self.jwt_encoder)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        password_hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            roles,
            password_hasher,
            jwt_encoder,
            jwt_decoder,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Find the account in the requested partition
    /// 2. Verify the password
    /// 3. Reject frozen accounts
    /// 4. Resolve roles and permissions
    /// 5. Issue a token pair
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<LoginResult, AppError> {
        // Step 1: Find user
        let user = self
            .users
            .find_account(username, is_admin)
            .await?
            .ok_or_else(|| AppError::authentication("user does not exist"))?;

        // Step 2: Verify password
        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            warn!(username = %username, is_admin, "Login rejected: incorrect password");
            return Err(AppError::authentication("incorrect password"));
        }

        // Step 3: Check account status
        if user.is_frozen {
            warn!(user_id = user.id, "Login rejected: account is frozen");
            return Err(AppError::authentication("account is frozen"));
        }

        // Step 4 & 5: Resolve identity and sign tokens
        let user_info = self.resolve_user_info(&user).await?;
        let issued = self.issue(&user_info)?;

        info!(user_id = user.id, is_admin, "Login successful");

        Ok(LoginResult {
            user_info,
            access_token: issued.tokens.access_token,
            refresh_token: issued.tokens.refresh_token,
        })
    }

    /// Build the login projection of `user` from its current grants.
    pub async fn resolve_user_info(&self, user: &User) -> Result<UserInfo, AppError> {
        let grants = self.roles.roles_with_permissions(user.id).await?;
        let (roles, permissions) = permission::aggregate(&grants);
        Ok(UserInfo::new(user, roles, permissions))
    }

    /// Sign a token pair for an already resolved identity.
    pub fn issue(&self, user_info: &UserInfo) -> Result<IssuedSession, AppError> {
        let claims = self.jwt_encoder.access_claims(user_info);
        let tokens = self.jwt_encoder.generate_token_pair(&claims)?;
        Ok(IssuedSession { claims, tokens })
    }

    /// Exchange a refresh token for a new pair.
    ///
    /// Roles and permissions are re-read so the new access token reflects
    /// current grants. Every failure maps to the same authentication error.
    pub async fn refresh(
        &self,
        refresh_token: &str,
        is_admin: bool,
    ) -> Result<IssuedSession, AppError> {
        let claims = self.jwt_decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_account_by_id(claims.user_id, is_admin)
            .await?
            .ok_or_else(|| {
                warn!(user_id = claims.user_id, is_admin, "Refresh for unknown account");
                AppError::authentication(INVALID_TOKEN_MESSAGE)
            })?;

        let user_info = self.resolve_user_info(&user).await?;
        let issued = self.issue(&user_info)?;

        info!(user_id = user.id, is_admin, "Token refreshed");
        Ok(issued)
    }
}
