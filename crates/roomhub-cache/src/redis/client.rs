//! Redis connection and key namespacing.

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use roomhub_core::config::cache::RedisCacheConfig;
use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;

/// Reconnecting Redis handle that namespaces every key with a prefix.
#[derive(Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    key_prefix: String,
}

impl std::fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisClient {
    /// Open a managed connection to the configured server.
    pub async fn connect(config: &RedisCacheConfig) -> AppResult<Self> {
        let client = Client::open(config.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid cache.redis.url", e)
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Cannot reach the credential store", e)
        })?;

        info!(prefix = %config.key_prefix, "Credential store connected to Redis");
        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// A connection handle for one command. Clones share the same socket.
    pub fn conn_mut(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// `key` inside this deployment's namespace.
    pub fn prefixed_key(&self, key: &str) -> String {
        namespaced(&self.key_prefix, key)
    }
}

fn namespaced(prefix: &str, key: &str) -> String {
    format!("{prefix}{key}")
}
