//! Core types: user, chat, message, handler response, and the Handler / Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// User identity (id, username, names).
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Name used when addressing the user: first name, then username, then a generic fallback.
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.username.as_deref())
            .unwrap_or("friend")
    }
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single inbound message. `content` is empty for non-text messages.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    /// None for messages without a sender (channel posts).
    pub user: Option<User>,
    pub chat: Chat,
    pub content: String,
    pub message_type: String,
    pub created_at: DateTime<Utc>,
    /// Set when the message was composed through another bot's inline mode.
    pub via_bot: bool,
}

impl Message {
    pub fn is_text(&self) -> bool {
        self.message_type == "text"
    }

    pub fn sender_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }
}

/// Handler result for the chain. `Reply(text)` carries the final response body so middleware can see it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the reply text that was sent.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Message handler. The chain calls `handle` on each handler until one returns Stop or Reply.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
}

/// Cross-cutting hook around the handler phase: `before` runs in order, `after` in reverse order.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Return false to stop the chain before any handler runs.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }

    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
