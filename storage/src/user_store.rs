use async_trait::async_trait;

use crate::error::StorageError;

/// Durable set of known user ids.
///
/// Implementations initialize their backing storage before they are handed out, so every
/// method may assume the schema exists.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts `user_id` if absent. Inserting a known id is a no-op, never an error.
    async fn ensure_registered(&self, user_id: i64) -> Result<(), StorageError>;

    /// Every known id, each exactly once. Order is unspecified.
    async fn all_ids(&self) -> Result<Vec<i64>, StorageError>;
}
