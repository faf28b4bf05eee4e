//! REPL runner: converts teloxide messages to core messages and hands each to the HandlerChain in its own task.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Fetches the bot's own username into `bot_username` (used for `/cmd@botname` matching), then polls
/// until shutdown. Handler errors are logged and never stop polling.
#[instrument(skip(bot, handler_chain, bot_username))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<RwLock<Option<String>>>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set before repl");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed; commands addressed with @username will not match"),
    }

    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            tokio::spawn(async move {
                info!(
                    user_id = ?core_msg.sender_id(),
                    chat_id = core_msg.chat.id,
                    message_id = %core_msg.id,
                    "step: processing message"
                );
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, user_id = ?core_msg.sender_id(), "Handler chain failed");
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
