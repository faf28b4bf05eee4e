//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI-compatible implementation. Transport-agnostic;
//! the bot's AI gateway depends only on the trait so tests can substitute a fake.

use anyhow::Result;
use async_trait::async_trait;

mod openai_llm;

pub use openai_llm::OpenAILlmClient;

/// Single-turn text completion: one prompt in, one answer out. No history is carried between calls.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
