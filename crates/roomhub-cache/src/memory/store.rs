//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use roomhub_core::config::cache::MemoryCacheConfig;
use roomhub_core::result::AppResult;
use roomhub_core::traits::cache::CacheProvider;

/// A cached value with its own lifetime; `None` never expires.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Option<Duration>,
}

/// Expiry policy reading the lifetime stored on each entry.
#[derive(Debug, Clone, Copy)]
struct PerEntryExpiry;

impl Expiry<String, Entry> for PerEntryExpiry {
    fn expire_after_create(&self, _key: &String, value: &Entry, _created_at: Instant) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// In-memory cache provider using moka.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, Entry>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryExpiry)
            .build();

        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = Entry {
            value: value.to_string(),
            ttl: Some(ttl),
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn set_persistent(&self, key: &str, value: &str) -> AppResult<()> {
        let entry = Entry {
            value: value.to_string(),
            ttl: None,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.get(key).await.is_some())
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let entry = Entry {
            value: value.to_string(),
            ttl: Some(ttl),
        };
        let stored = self
            .cache
            .entry(key.to_string())
            .or_insert_with(async move { entry })
            .await;
        let inserted = stored.is_fresh();
        debug!(key, inserted, "Conditional cache insert");
        Ok(inserted)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
