//! `POST /chat`

use crate::core::ChatKey;
use crate::error::RequestError;
use crate::llm::chat_answer;
use crate::web::AppState;
use crate::web::error::{ApiError, ApiResult};
use crate::web::session::SessionId;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// JSON body of a chat request. Missing fields are empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    /// Document URL, as summarized before.
    pub paper_url: String,
    /// The user's question.
    pub message: String,
}

impl ChatRequest {
    /// Parses a body regardless of its content type. Anything that is not a
    /// JSON object with string fields yields an empty request.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Answers a question about a summarized document.
///
/// The question is recorded before the model is called and removed again if
/// the call fails, so a failed exchange leaves no trace in the history.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let request = ChatRequest::from_body(&body);
    let url = request.paper_url.trim();
    let message = request.message.trim();
    if url.is_empty() || message.is_empty() {
        return Err(crate::Error::from(RequestError::MissingChatFields).into());
    }

    let text = state
        .documents
        .text(url)
        .ok_or_else(|| ApiError::from(crate::Error::from(RequestError::NotSummarized)))?;

    let key = ChatKey::new(session.as_str(), url);
    let (pending, history) = state.chats.begin_turn(&key, message);

    match chat_answer(
        state.model.as_ref(),
        &text,
        &history,
        state.settings.chat_context_chars,
    )
    .await
    {
        Ok(answer) => {
            info!(%url, turns = history.len() + 1, "chat answered");
            if !state.chats.commit(&key, pending, answer.clone()) {
                warn!(%url, "question vanished before its answer was stored");
            }
            Ok(Json(json!({ "ok": true, "answer": answer })))
        }
        Err(err) => {
            state.chats.rollback(&key, pending);
            warn!(%url, error = %err, "chat failed; question rolled back");
            Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        }
    }
}
