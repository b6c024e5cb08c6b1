//! Text generation port.
//!
//! Every agent talks to the model through `TextGenerator`: one instruction in,
//! one free-form response out. The trait exists so tests can script responses
//! without an inference endpoint.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::errors::{DebateError, GenerationError};

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce a response for `instruction`. Blank responses are errors.
    async fn generate(&self, instruction: &str) -> Result<String, GenerationError>;
}

/// Production generator backed by a rig OpenAI-compatible completions client.
pub struct RigGenerator {
    client: openai::CompletionsClient,
    model: String,
    temperature: f64,
    max_tokens: u64,
}

impl RigGenerator {
    pub fn new(config: &ProviderConfig) -> Result<Self, DebateError> {
        let client = openai::CompletionsClient::builder()
            .api_key(&config.api_key)
            .base_url(&config.base_url)
            .build()
            .map_err(|e| {
                DebateError::Configuration(format!("failed to build completions client: {e}"))
            })?;

        Ok(Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl TextGenerator for RigGenerator {
    async fn generate(&self, instruction: &str) -> Result<String, GenerationError> {
        let agent = self
            .client
            .agent(&self.model)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build();

        debug!(model = %self.model, chars = instruction.len(), "Sending instruction");
        let response: String = agent
            .prompt(instruction)
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        non_blank(response)
    }
}

/// Reject responses that carry no text.
pub fn non_blank(response: String) -> Result<String, GenerationError> {
    if response.trim().is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(response)
    }
}
