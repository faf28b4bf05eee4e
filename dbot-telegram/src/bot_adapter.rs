//! Wraps teloxide::Bot and implements [`dbot_core::Bot`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, DbotError};
use teloxide::{prelude::*, types::ChatId};

/// Telegram rejects text messages longer than this.
pub const TELEGRAM_MAX_MESSAGE_LEN: usize = 4096;

/// Builds a teloxide Bot, optionally pointed at a custom Bot API server (e.g. a local mock).
pub fn build_teloxide_bot(token: &str, api_url: Option<&str>) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(token);
    match api_url {
        Some(url) => {
            let url = reqwest::Url::parse(url)
                .with_context(|| format!("Invalid Telegram API url: {}", url))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Splits `text` into parts of at most `max_chars` characters, preferring to cut after a newline.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut rest = text;

    while rest.chars().count() > max_chars {
        let cut = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let split_at = match rest[..cut].rfind('\n') {
            Some(i) if i > 0 => i + 1,
            _ => cut,
        };
        parts.push(rest[..split_at].to_string());
        rest = &rest[split_at..];
    }

    if !rest.is_empty() || parts.is_empty() {
        parts.push(rest.to_string());
    }
    parts
}

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    /// Long texts go out as several consecutive messages; the first failing part aborts the rest.
    async fn send_message(&self, chat_id: i64, text: &str) -> dbot_core::Result<()> {
        for part in split_message(text, TELEGRAM_MAX_MESSAGE_LEN) {
            self.bot
                .send_message(ChatId(chat_id), part)
                .await
                .map_err(|e| DbotError::Bot(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_message_short_text_is_single_part() {
        assert_eq!(split_message("hello", 10), vec!["hello"]);
        assert_eq!(split_message("", 10), vec![""]);
    }

    #[test]
    fn test_split_message_hard_cut() {
        assert_eq!(split_message("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(split_message("abcdefgh", 4), vec!["abcd", "efgh"]);
    }

    #[test]
    fn test_split_message_prefers_newline() {
        assert_eq!(split_message("ab\ncdef", 4), vec!["ab\n", "cdef"]);
    }

    #[test]
    fn test_split_message_counts_chars_not_bytes() {
        let text = "ёжик".repeat(3);
        let parts = split_message(&text, 4);
        assert_eq!(parts, vec!["ёжик", "ёжик", "ёжик"]);
    }

    #[test]
    fn test_build_teloxide_bot_rejects_bad_url() {
        assert!(build_teloxide_bot("dummy_token", Some("not a url")).is_err());
        assert!(build_teloxide_bot("dummy_token", Some("http://127.0.0.1:8081")).is_ok());
        assert!(build_teloxide_bot("dummy_token", None).is_ok());
    }
}
