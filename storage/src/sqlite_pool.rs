//! SQLite connection pool wrapper for the storage crate.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::StorageError;

/// Manages a single SQLite pool; creates the database file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for a `sqlite:` url (`sqlite://users.db`, `sqlite::memory:`) or a bare file path.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        info!(database_url = %database_url, "Initializing SQLite pool");

        let options = if database_url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(database_url)
                .map_err(|e| StorageError::InvalidUrl(format!("{}: {}", database_url, e)))?
        } else {
            SqliteConnectOptions::new().filename(database_url)
        };
        let options = options.create_if_missing(true);

        // An in-memory database lives only as long as its connection: keep exactly one, never recycled.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .max_lifetime(None)
                .idle_timeout(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
