//! [`LlmClient`] backed by openai-client; optionally prepends a system message.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, OpenAIClient,
};
use tracing::instrument;

use super::LlmClient;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone)]
pub struct OpenAILlmClient {
    client: OpenAIClient,
    model: String,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self::from_client(OpenAIClient::new(api_key))
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::from_client(OpenAIClient::with_base_url(api_key, base_url))
    }

    fn from_client(client: OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// System message (if configured) followed by the prompt as the only user message.
    fn build_messages(&self, prompt: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system.clone())
                    .build()?
                    .into(),
            );
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()?
                .into(),
        );
        Ok(messages)
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages = self.build_messages(prompt)?;
        self.client.chat_completion(&self.model, messages).await
    }
}
