//! Storage crate: the user registry behind the relay bot.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`user_store`] – UserStore trait (idempotent insert + full enumeration)
//! - [`user_repo`] – UserRepository (SQLite `users` table)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod sqlite_pool;
mod user_repo;
mod user_store;


pub use error::StorageError;
pub use sqlite_pool::SqlitePoolManager;
pub use user_repo::UserRepository;
pub use user_store::UserStore;
