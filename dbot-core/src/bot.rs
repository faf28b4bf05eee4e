//! Bot abstraction for outbound messages.
//!
//! [`Bot`] is transport-agnostic; `dbot_telegram::TelegramBotAdapter` implements it via teloxide,
//! tests substitute recording mocks.

use crate::error::Result;
use crate::types::Message;
use async_trait::async_trait;

/// Outbound side of the transport: plain-text sends to a chat or user id.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat. For private chats the chat id equals the user id.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Replies in the chat the message came from.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(message.chat.id, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chat, User};
    use std::sync::Mutex;

    struct RecordingBot {
        sent: Mutex<Vec<(i64, String)>>,
    }

    #[async_trait]
    impl Bot for RecordingBot {
        async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_reply_to_sends_to_message_chat() {
        let bot = RecordingBot {
            sent: Mutex::new(Vec::new()),
        };
        let message = Message {
            id: "1".to_string(),
            user: Some(User {
                id: 7,
                username: None,
                first_name: Some("Ann".to_string()),
                last_name: None,
            }),
            chat: Chat {
                id: -100,
                chat_type: "group".to_string(),
            },
            content: "hi".to_string(),
            message_type: "text".to_string(),
            created_at: chrono::Utc::now(),
            via_bot: false,
        };

        bot.reply_to(&message, "pong").await.unwrap();

        let sent = bot.sent.lock().unwrap();
        assert_eq!(sent.as_slice(), &[(-100, "pong".to_string())]);
    }
}
