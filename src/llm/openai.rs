//! OpenAI-compatible chat completions backend.

use super::{CompletionRequest, LanguageModel};
use crate::core::{ChatRole, ChatTurn};
use crate::error::{LlmError, Result};
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::debug;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Connection settings for [`OpenAiModel`].
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key. Required.
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Model name.
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// [`LanguageModel`] backed by the chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiModel {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiModel {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when no non-empty key is configured.
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(config.base_url.trim_end_matches('/'));

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model.clone(),
        })
    }
}

fn to_message(turn: &ChatTurn) -> Result<ChatCompletionRequestMessage> {
    let message = match turn.role {
        ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(turn.text.as_str())
            .build()?
            .into(),
        ChatRole::Model => ChatCompletionRequestAssistantMessageArgs::default()
            .content(turn.text.as_str())
            .build()?
            .into(),
    };
    Ok(message)
}

#[async_trait]
impl LanguageModel for OpenAiModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(request.messages.len() + 1);
        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.as_str())
                .build()?
                .into(),
        );
        for turn in &request.messages {
            messages.push(to_message(turn)?);
        }

        let api_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(request.temperature)
            .max_completion_tokens(request.max_tokens)
            .build()?;

        debug!(model = %self.model, turns = request.messages.len(), "sending completion");
        let response = self.client.chat().create(api_request).await?;

        let answer = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if answer.is_empty() {
            return Err(LlmError::EmptyResponse.into());
        }
        if let Some(usage) = response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion finished"
            );
        }
        Ok(answer)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
