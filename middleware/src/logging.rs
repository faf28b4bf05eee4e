use async_trait::async_trait;
use dbot_core::{HandlerResponse, Message, Middleware, Result};
use tracing::{debug, info, instrument};

/// Logs each inbound message in before() and the outcome in after(); never stops the chain.
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = ?message.sender_id(),
            chat_id = message.chat.id,
            username = %message
                .user
                .as_ref()
                .and_then(|u| u.username.as_deref())
                .unwrap_or("unknown"),
            message_type = %message.message_type,
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        match response {
            HandlerResponse::Reply(text) => info!(
                user_id = ?message.sender_id(),
                message_id = %message.id,
                reply_len = text.chars().count(),
                "Replied to message"
            ),
            other => debug!(
                user_id = ?message.sender_id(),
                message_id = %message.id,
                response = ?other,
                "Processed message without reply"
            ),
        }
        Ok(())
    }
}
