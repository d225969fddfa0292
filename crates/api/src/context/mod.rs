//! Application context - dependency injection container

use std::sync::Arc;

use slotbook_core::SlotRepository as SlotRepositoryPort;
use slotbook_domain::{Config, Result, SlotbookError};
use slotbook_infra::{DbManager, SqliteSlotRepository};
use tracing::warn;

/// Type alias for slot repository port trait object
///
/// `SlotRepositoryPort` already has `Send + Sync` supertraits, so the
/// trait object is thread-safe without repeating the bounds here.
type DynSlotRepositoryPort = dyn SlotRepositoryPort;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub slots: Arc<DynSlotRepositoryPort>,
}

impl AppContext {
    /// Create a new application context with default configuration
    pub async fn new() -> Result<Self> {
        Self::new_with_config(Config::default()).await
    }

    /// Create a new application context with custom configuration
    ///
    /// This method is primarily for testing, allowing tests to specify a
    /// custom database path and avoid conflicts with the production database.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);

        // Run migrations
        db.run_migrations()?;

        let slots: Arc<DynSlotRepositoryPort> = Arc::new(SqliteSlotRepository::new(db.clone()));

        if config.calendar.client_id.is_empty() {
            warn!("Google client id is not configured; OAuth and token refresh will fail");
        }

        Ok(Self { config, db, slots })
    }

    /// Check database health by attempting a simple query
    ///
    /// Uses spawn_blocking to avoid blocking the async runtime with
    /// synchronous database operations.
    pub async fn database_health(&self) -> Result<()> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.health_check())
            .await
            .map_err(|e| SlotbookError::Internal(format!("health check task failed: {e}")))?
    }
}
