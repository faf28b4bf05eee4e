//! # OpenAI-compatible API client
//!
//! Thin wrapper around [async-openai] for single-shot chat completion against any
//! OpenAI-compatible endpoint (OpenAI itself, Gemini's compatibility layer, local proxies).
//! Provides token masking for safe logging.

use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use std::sync::Arc;

pub use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key for logging: first 7 chars + "***" + last 4 chars.
/// Keys of 11 chars or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Chat completion client. Clones share one underlying HTTP client.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    /// Kept only for masked logging.
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Uses the default OpenAI base URL.
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging: api_key,
        }
    }

    /// Targets a custom base URL, e.g. `https://generativelanguage.googleapis.com/v1beta/openai`.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging: api_key,
        }
    }

    /// Sends one chat completion request and returns the first choice's text.
    ///
    /// Fails when the endpoint errors, returns no choices, or returns an empty answer.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        let masked = mask_token(&self.api_key_for_logging);

        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %masked,
            "chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        let choice = response
            .choices
            .first()
            .ok_or_else(|| anyhow::anyhow!("No choices in completion response"))?;
        let content = choice.message.content.clone().unwrap_or_default();
        if content.trim().is_empty() {
            anyhow::bail!("Completion response has empty content");
        }
        Ok(content)
    }
}
