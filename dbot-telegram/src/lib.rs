//! # dbot-telegram
//!
//! Telegram transport layer: teloxide → core adapters, the [`dbot_core::Bot`] implementation and the
//! REPL runner. Knows nothing about storage or AI; every message goes through a handler chain.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{build_teloxide_bot, split_message, TelegramBotAdapter, TELEGRAM_MAX_MESSAGE_LEN};
pub use runner::run_repl;
