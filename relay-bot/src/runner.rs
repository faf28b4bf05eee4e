//! Startup: configuration check, logging, registry, clients, handler chain, then long polling.

use anyhow::{Context, Result};
use dbot_core::{init_tracing, Bot as CoreBot};
use dbot_telegram::{build_teloxide_bot, run_repl, TelegramBotAdapter};
use handler_chain::HandlerChain;
use llm_client::{LlmClient, OpenAILlmClient};
use middleware::LoggingMiddleware;
use std::sync::Arc;
use storage::{UserRepository, UserStore};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::broadcast::BroadcastEngine;
use crate::command::Command;
use crate::config::BotConfig;
use crate::gateway::AiGateway;
use crate::router::CommandRouter;

/// Builds the chain every inbound message runs through: logging middleware, then the command router.
pub fn build_handler_chain(
    config: &BotConfig,
    store: Arc<dyn UserStore>,
    bot: Arc<dyn CoreBot>,
    llm: Arc<dyn LlmClient>,
    bot_username: Arc<RwLock<Option<String>>>,
) -> HandlerChain {
    let broadcaster = BroadcastEngine::new(
        store.clone(),
        bot.clone(),
        config.broadcast_send_timeout,
        config.broadcast_concurrency,
    );
    let router = CommandRouter::new(
        store,
        bot,
        AiGateway::new(llm),
        broadcaster,
        config.admin_id,
        config.ai_thinking_message.clone(),
        bot_username,
    );

    HandlerChain::new()
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_handler(Arc::new(router))
}

/// Main entry: validate config, init logging, open the user registry, build clients and the chain,
/// register the command list, then run the REPL. Any failure before polling is fatal.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        ai_base_url = %config.ai_base_url,
        ai_model = %config.ai_model,
        admin_id = config.admin_id,
        "Initializing bot"
    );

    let repo = UserRepository::new(&config.database_url)
        .await
        .with_context(|| format!("Failed to open user registry at {}", config.database_url))?;
    let store: Arc<dyn UserStore> = Arc::new(repo);

    let teloxide_bot = build_teloxide_bot(&config.bot_token, config.telegram_api_url.as_deref())?;
    let bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let llm: Arc<dyn LlmClient> = Arc::new(
        OpenAILlmClient::with_base_url(config.ai_api_key.clone(), config.ai_base_url.clone())
            .with_model(config.ai_model.clone())
            .with_system_prompt_opt(config.ai_system_prompt.clone()),
    );

    let bot_username = Arc::new(RwLock::new(None));
    let handler_chain = build_handler_chain(&config, store, bot, llm, bot_username.clone());

    if let Err(e) = teloxide_bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("✅ Bot started");

    run_repl(teloxide_bot, handler_chain, bot_username).await
}
