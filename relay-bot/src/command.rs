//! Classification of inbound messages into a closed set of actions.
//!
//! Only the leading token of a message is parsed as a command; anything after it is the body.
//! Unknown commands and commands addressed to another bot (`/start@other_bot`) are plain text.

use dbot_core::Message;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "register and get a greeting")]
    Start,
    #[command(description = "show your Telegram id")]
    Id,
    #[command(description = "show your Telegram id")]
    Whoami,
    #[command(description = "count registered users (admin only)")]
    Users,
    #[command(description = "send a message to every user: /sendall <text> (admin only)")]
    Sendall,
}

/// What the router should do with one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    WhoAmI,
    ListUsers,
    /// Broadcast body with surrounding whitespace removed; may be empty.
    Broadcast(String),
    /// Free text for the AI, passed through unchanged.
    Ask(String),
    /// Not for this bot: no sender, non-text, blank, or relayed through another bot.
    Ignore,
}

pub fn classify(message: &Message, bot_username: &str) -> Action {
    if message.user.is_none() || message.via_bot || !message.is_text() {
        return Action::Ignore;
    }
    let text = message.content.trim();
    if text.is_empty() {
        return Action::Ignore;
    }

    let (head, body) = match text.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (text, ""),
    };

    match Command::parse(head, bot_username) {
        Ok(Command::Start) => Action::Start,
        Ok(Command::Id) | Ok(Command::Whoami) => Action::WhoAmI,
        Ok(Command::Users) => Action::ListUsers,
        Ok(Command::Sendall) => Action::Broadcast(body.to_string()),
        Err(_) => Action::Ask(message.content.clone()),
    }
}
