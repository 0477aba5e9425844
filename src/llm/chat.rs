//! Document-grounded chat.

use super::prompt::build_chat_system_prompt;
use super::{CompletionRequest, LanguageModel};
use crate::core::ChatTurn;
use crate::error::{LlmError, Result};
use crate::text::truncate_chars;
use tracing::debug;

/// Default number of document characters embedded in the chat prompt.
pub const DEFAULT_CHAT_CONTEXT_CHARS: usize = 60_000;

/// Answers the latest user turn of `history` from `text`.
///
/// The document is embedded in the system prompt, cut to `context_chars`
/// characters. Turns are passed to the model in order.
///
/// # Errors
///
/// Returns [`LlmError::EmptyHistory`] when there are no turns, and any model
/// error otherwise.
pub async fn chat_answer(
    model: &dyn LanguageModel,
    text: &str,
    history: &[ChatTurn],
    context_chars: usize,
) -> Result<String> {
    if history.is_empty() {
        return Err(LlmError::EmptyHistory.into());
    }

    let document = truncate_chars(text, context_chars);
    if document.len() < text.len() {
        debug!(
            kept = context_chars,
            total = text.chars().count(),
            "document truncated for chat context"
        );
    }

    let request = CompletionRequest::new(build_chat_system_prompt(document))
        .history(history)
        .temperature(0.3)
        .max_tokens(800);
    model.complete(request).await
}
