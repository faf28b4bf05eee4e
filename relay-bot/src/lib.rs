//! # Relay bot
//!
//! Telegram bot that relays free text to an AI completion endpoint and gives one admin a user count
//! and a broadcast command. Wires storage, the AI gateway, the broadcast engine and the command
//! router into a handler chain and runs the REPL.

pub mod broadcast;
pub mod cli;
pub mod command;
pub mod config;
pub mod gateway;
pub mod replies;
pub mod router;
pub mod runner;

pub use broadcast::{BroadcastEngine, BroadcastReport, DeliveryAttempt, DeliveryOutcome};
pub use cli::{load_config, Cli, Commands};
pub use command::{classify, Action, Command};
pub use config::BotConfig;
pub use gateway::{AiGateway, WARNING_MARKER};
pub use router::CommandRouter;
pub use runner::{build_handler_chain, run_bot};
