//! Bot configuration, read once from the environment at startup.

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// Admin id used when `ADMIN_ID` is unset; matches no real account.
pub const DEFAULT_ADMIN_ID: i64 = 123456789;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://users.db";
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_THINKING_MESSAGE: &str = "⏳ AI is writing an answer...";
pub const DEFAULT_LOG_FILE: &str = "logs/telegram-bot.log";

pub struct BotConfig {
    pub bot_token: String,
    pub ai_api_key: String,
    pub admin_id: i64,
    pub database_url: String,
    pub ai_base_url: String,
    pub ai_model: String,
    /// Interim acknowledgment sent before the completion call.
    pub ai_thinking_message: String,
    pub ai_system_prompt: Option<String>,
    pub broadcast_send_timeout: Duration,
    /// Maximum number of broadcast sends in flight; 1 means strictly sequential.
    pub broadcast_concurrency: usize,
    pub log_file: String,
    /// Optional Bot API base URL (e.g. a local mock server). Env: `TELEGRAM_API_URL` or `TELOXIDE_API_URL`.
    pub telegram_api_url: Option<String>,
}

/// First of `keys` that is set to a non-blank value.
fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| env::var(k).ok())
        .find(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match first_env(&[key]) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", key, raw)),
        None => Ok(default),
    }
}

impl BotConfig {
    /// Loads configuration from the environment. `token` overrides `TELEGRAM_BOT_TOKEN` / `BOT_TOKEN`.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => first_env(&["TELEGRAM_BOT_TOKEN", "BOT_TOKEN"])
                .context("TELEGRAM_BOT_TOKEN not set")?,
        };
        let ai_api_key =
            first_env(&["GEMINI_API_KEY", "AI_API_KEY"]).context("GEMINI_API_KEY not set")?;
        let admin_id = parse_env("ADMIN_ID", DEFAULT_ADMIN_ID)?;
        let database_url =
            first_env(&["DATABASE_URL"]).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let ai_base_url =
            first_env(&["AI_BASE_URL"]).unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string());
        let ai_model = first_env(&["AI_MODEL"]).unwrap_or_else(|| DEFAULT_AI_MODEL.to_string());
        let ai_thinking_message = first_env(&["AI_THINKING_MESSAGE"])
            .unwrap_or_else(|| DEFAULT_THINKING_MESSAGE.to_string());
        let ai_system_prompt = first_env(&["AI_SYSTEM_PROMPT"]);
        let broadcast_send_timeout =
            Duration::from_secs(parse_env("BROADCAST_SEND_TIMEOUT_SECS", 10u64)?);
        let broadcast_concurrency = parse_env("BROADCAST_CONCURRENCY", 1usize)?;
        let log_file = first_env(&["LOG_FILE"]).unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        let telegram_api_url = first_env(&["TELEGRAM_API_URL", "TELOXIDE_API_URL"]);

        Ok(Self {
            bot_token,
            ai_api_key,
            admin_id,
            database_url,
            ai_base_url,
            ai_model,
            ai_thinking_message,
            ai_system_prompt,
            broadcast_send_timeout,
            broadcast_concurrency,
            log_file,
            telegram_api_url,
        })
    }

    /// Rejects values that would only fail later while serving.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            bail!("Telegram bot token is empty");
        }
        if self.ai_api_key.trim().is_empty() {
            bail!("AI API key is empty");
        }
        if self.broadcast_concurrency == 0 {
            bail!("BROADCAST_CONCURRENCY must be at least 1");
        }
        if self.broadcast_send_timeout.is_zero() {
            bail!("BROADCAST_SEND_TIMEOUT_SECS must be greater than 0");
        }
        if self.ai_thinking_message.trim().is_empty() {
            bail!("AI_THINKING_MESSAGE must not be blank");
        }
        Ok(())
    }
}
