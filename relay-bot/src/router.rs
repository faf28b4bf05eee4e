//! Command router: classifies each message and runs exactly one reply path.

use async_trait::async_trait;
use dbot_core::{Bot, DbotError, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use storage::{StorageError, UserStore};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::broadcast::BroadcastEngine;
use crate::command::{classify, Action};
use crate::gateway::AiGateway;
use crate::replies;

fn storage_error(e: StorageError) -> DbotError {
    DbotError::Database(e.to_string())
}

pub struct CommandRouter {
    store: Arc<dyn UserStore>,
    bot: Arc<dyn Bot>,
    gateway: AiGateway,
    broadcaster: BroadcastEngine,
    admin_id: i64,
    thinking_message: String,
    /// Filled by the runner once `get_me` returns; until then `/cmd@name` forms are not matched.
    bot_username: Arc<RwLock<Option<String>>>,
}

impl CommandRouter {
    pub fn new(
        store: Arc<dyn UserStore>,
        bot: Arc<dyn Bot>,
        gateway: AiGateway,
        broadcaster: BroadcastEngine,
        admin_id: i64,
        thinking_message: String,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            store,
            bot,
            gateway,
            broadcaster,
            admin_id,
            thinking_message,
            bot_username,
        }
    }

    fn is_admin(&self, user_id: i64) -> bool {
        user_id == self.admin_id
    }

    /// Produces the final reply for `action`, or None when the message is not for this bot.
    /// Only the free-text path sends anything itself (the interim acknowledgment).
    async fn dispatch(&self, message: &Message, action: Action) -> Result<Option<String>> {
        let Some(user) = message.user.as_ref() else {
            return Ok(None);
        };
        let reply = match action {
            Action::Ignore => return Ok(None),
            Action::Start => {
                self.store
                    .ensure_registered(user.id)
                    .await
                    .map_err(storage_error)?;
                replies::greeting(user.display_name())
            }
            Action::WhoAmI => replies::your_id(user.id),
            Action::ListUsers => {
                if !self.is_admin(user.id) {
                    info!(user_id = user.id, "Denied /users to non-admin");
                    replies::DENIED.to_string()
                } else {
                    let ids = self.store.all_ids().await.map_err(storage_error)?;
                    replies::user_count(ids.len())
                }
            }
            Action::Broadcast(body) => {
                if !self.is_admin(user.id) {
                    info!(user_id = user.id, "Denied /sendall to non-admin");
                    replies::DENIED.to_string()
                } else if body.is_empty() {
                    replies::SENDALL_USAGE.to_string()
                } else {
                    let report = self
                        .broadcaster
                        .broadcast(&body)
                        .await
                        .map_err(storage_error)?;
                    replies::broadcast_done(report.delivered(), report.total())
                }
            }
            Action::Ask(prompt) => {
                self.store
                    .ensure_registered(user.id)
                    .await
                    .map_err(storage_error)?;
                self.bot.reply_to(message, &self.thinking_message).await?;
                self.gateway.complete(&prompt).await
            }
        };
        Ok(Some(reply))
    }
}

#[async_trait]
impl Handler for CommandRouter {
    /// Storage failures are answered with a generic apology; transport failures propagate to the chain.
    #[instrument(skip(self, message), fields(user_id = ?message.sender_id(), chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let bot_username = self.bot_username.read().await.clone().unwrap_or_default();
        let action = classify(message, &bot_username);
        info!(action = ?action, "Classified message");

        let reply = match self.dispatch(message, action).await {
            Ok(Some(reply)) => reply,
            Ok(None) => return Ok(HandlerResponse::Ignore),
            Err(DbotError::Database(e)) => {
                error!(error = %e, "Storage failure while handling message");
                replies::INTERNAL_ERROR.to_string()
            }
            Err(e) => return Err(e),
        };

        self.bot.reply_to(message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
