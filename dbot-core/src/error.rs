use thiserror::Error;

/// Errors surfaced by handlers and the outbound transport.
#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Bot error: {0}")]
    Bot(String),
}

pub type Result<T> = std::result::Result<T, DbotError>;
