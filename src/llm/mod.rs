//! Language model layer.
//!
//! The web layer and CLI talk to a [`LanguageModel`], which turns a
//! [`CompletionRequest`] into text. [`OpenAiModel`] is the production
//! implementation; tests substitute scripted fakes.
//!
//! On top of the trait sit the two document operations:
//!
//! - [`summarize_map_reduce`]: chunk, condense each chunk, then write the
//!   final summary at the requested [`crate::core::SummaryLevel`]
//! - [`chat_answer`]: answer the latest question of a conversation using
//!   the document as context

pub mod chat;
pub mod openai;
pub mod prompt;
pub mod summarize;

pub use chat::{DEFAULT_CHAT_CONTEXT_CHARS, chat_answer};
pub use openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiConfig, OpenAiModel};
pub use summarize::{SummaryConfig, summarize_map_reduce};

use crate::core::ChatTurn;
use crate::error::Result;
use async_trait::async_trait;

/// One call to a chat-style model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instructions.
    pub system: String,
    /// Conversation, oldest first.
    pub messages: Vec<ChatTurn>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Creates a request with no messages, temperature 0.2, and 1024 output tokens.
    #[must_use]
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            messages: Vec::new(),
            temperature: 0.2,
            max_tokens: 1024,
        }
    }

    /// Appends a user message.
    #[must_use]
    pub fn user(mut self, text: impl Into<String>) -> Self {
        self.messages.push(ChatTurn::user(text));
        self
    }

    /// Appends existing turns in order.
    #[must_use]
    pub fn history(mut self, turns: &[ChatTurn]) -> Self {
        self.messages.extend_from_slice(turns);
        self
    }

    /// Sets the temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the output token limit.
    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A text-generating model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Runs a completion and returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the model produces no text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Model identifier, for logs.
    fn name(&self) -> &str;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted model shared by the unit tests of this module.

    use super::{CompletionRequest, LanguageModel};
    use crate::error::{LlmError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers every request with `respond(request)` and records it.
    pub struct ScriptedModel<F> {
        respond: F,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl<F> ScriptedModel<F>
    where
        F: Fn(&CompletionRequest) -> Option<String> + Send + Sync,
    {
        pub fn new(respond: F) -> Self {
            Self {
                respond,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<F> LanguageModel for ScriptedModel<F>
    where
        F: Fn(&CompletionRequest) -> Option<String> + Send + Sync,
    {
        async fn complete(&self, request: CompletionRequest) -> Result<String> {
            let answer = (self.respond)(&request);
            self.requests.lock().unwrap().push(request);
            answer.ok_or_else(|| LlmError::Api("scripted failure".to_string()).into())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }
}
