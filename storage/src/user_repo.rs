//! User repository: the `users` table (single unique integer key column `id`).

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::sqlite_pool::SqlitePoolManager;
use crate::user_store::UserStore;

#[derive(Clone)]
pub struct UserRepository {
    pool_manager: SqlitePoolManager,
}

impl UserRepository {
    /// Connects and creates the schema if absent. Safe to call repeatedly against the same database.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating users table if not exist");

        sqlx::query("CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY)")
            .execute(self.pool_manager.pool())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    #[instrument(skip(self))]
    async fn ensure_registered(&self, user_id: i64) -> Result<(), StorageError> {
        let result = sqlx::query("INSERT OR IGNORE INTO users (id) VALUES (?)")
            .bind(user_id)
            .execute(self.pool_manager.pool())
            .await?;

        if result.rows_affected() > 0 {
            info!(user_id = user_id, "Registered new user");
        } else {
            debug!(user_id = user_id, "User already registered");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn all_ids(&self) -> Result<Vec<i64>, StorageError> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM users")
            .fetch_all(self.pool_manager.pool())
            .await?;
        debug!(count = ids.len(), "Loaded user ids");
        Ok(ids)
    }
}
