//! Store wiring selected by configuration.

use std::sync::Arc;

use tracing::info;

use roomhub_core::config::database::DatabaseConfig;
use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{
    BookingRepository, MeetingRoomRepository, RoleRepository, StatisticRepository, UserRepository,
};
use crate::store::{BookingStore, MeetingRoomStore, RoleStore, StatisticStore, UserStore};

/// Handles to every store, backed by PostgreSQL or by one shared
/// [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    pub users: Arc<dyn UserStore>,
    pub roles: Arc<dyn RoleStore>,
    pub meeting_rooms: Arc<dyn MeetingRoomStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub statistics: Arc<dyn StatisticStore>,
    pool: Option<DatabasePool>,
}

impl DatabaseManager {
    /// Create the stores from configuration.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL store");
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            "memory" => {
                info!("Initializing in-memory store");
                Ok(Self::memory(Arc::new(MemoryStore::new())))
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Back every store with PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            roles: Arc::new(RoleRepository::new(pg.clone())),
            meeting_rooms: Arc::new(MeetingRoomRepository::new(pg.clone())),
            bookings: Arc::new(BookingRepository::new(pg.clone())),
            statistics: Arc::new(StatisticRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Back every store with the same in-memory tables.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            roles: store.clone(),
            meeting_rooms: store.clone(),
            bookings: store.clone(),
            statistics: store,
            pool: None,
        }
    }

    /// Check store connectivity. The memory store is always healthy.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Close the connection pool, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
