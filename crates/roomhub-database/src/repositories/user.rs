//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::types::PageResponse;
use roomhub_entity::user::{CreateUser, UpdateProfile, User, UserQuery};

use crate::connection::like_pattern;
use crate::store::UserStore;

const SEARCH_FILTER: &str = "($1::text IS NULL OR username ILIKE $1) \
     AND ($2::text IS NULL OR nick_name ILIKE $2) \
     AND ($3::text IS NULL OR email ILIKE $3)";

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    async fn find_account(&self, username: &str, is_admin: bool) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1 AND is_admin = $2")
            .bind(username)
            .bind(is_admin)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account", e))
    }

    async fn find_account_by_id(&self, id: i64, is_admin: bool) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND is_admin = $2")
            .bind(id)
            .bind(is_admin)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    async fn find_first_admin(&self) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE is_admin = TRUE ORDER BY id LIMIT 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find admin", e))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, nick_name, email, is_admin) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(&data.nick_name)
        .bind(&data.email)
        .bind(data.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict("username already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_profile(&self, data: &UpdateProfile) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET \
                nick_name = COALESCE($2, nick_name), \
                head_pic = COALESCE($3, head_pic), \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(data.id)
        .bind(&data.nick_name)
        .bind(&data.head_pic)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_frozen(&self, id: i64, frozen: bool) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET is_frozen = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(frozen)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to freeze user", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &UserQuery) -> AppResult<PageResponse<User>> {
        let username = like_pattern(query.username.as_deref());
        let nick_name = like_pattern(query.nick_name.as_deref());
        let email = like_pattern(query.email.as_deref());

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users WHERE {SEARCH_FILTER}"))
                .bind(&username)
                .bind(&nick_name)
                .bind(&email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count users", e)
                })?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT * FROM users WHERE {SEARCH_FILTER} ORDER BY id LIMIT $4 OFFSET $5"
        ))
        .bind(&username)
        .bind(&nick_name)
        .bind(&email)
        .bind(query.page.limit() as i64)
        .bind(query.page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search users", e))?;

        Ok(PageResponse::new(users, total as u64))
    }
}
