//! AI gateway: prompt in, displayable text out. Completion failures never leave this module as errors.

use llm_client::LlmClient;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Prefix of every diagnostic the gateway produces instead of an answer.
pub const WARNING_MARKER: &str = "⚠️";

#[derive(Clone)]
pub struct AiGateway {
    client: Arc<dyn LlmClient>,
}

impl AiGateway {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Returns the completion, or a [`WARNING_MARKER`]-prefixed diagnostic when the call fails or
    /// comes back blank.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn complete(&self, prompt: &str) -> String {
        match self.client.complete(prompt).await {
            Ok(answer) if !answer.trim().is_empty() => {
                info!(answer_len = answer.len(), "Completion received");
                answer
            }
            Ok(_) => {
                warn!("Completion was empty");
                format!("{} AI could not answer:\nthe response was empty", WARNING_MARKER)
            }
            Err(e) => {
                warn!(error = %e, "Completion failed");
                format!("{} AI could not answer:\n{:#}", WARNING_MARKER, e)
            }
        }
    }
}
